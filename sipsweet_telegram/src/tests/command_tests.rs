use teloxide::utils::command::BotCommands;

use crate::Command;

#[test]
fn help_lists_settings_commands() {
    let help = Command::descriptions().to_string();

    for command in ["/sip", "/status", "/interval", "/dnd", "/goal", "/timezone", "/flower"] {
        assert!(help.contains(command), "{command} missing from {help}");
    }
}

#[test]
fn text_arguments_are_passed_whole() {
    assert_eq!(
        Command::parse("/dnd 22:00 07:00", "sipsweet_bot").unwrap(),
        Command::Dnd("22:00 07:00".to_owned())
    );
    assert_eq!(
        Command::parse("/timezone Europe/Berlin", "sipsweet_bot").unwrap(),
        Command::Timezone("Europe/Berlin".to_owned())
    );
}

#[test]
fn numeric_arguments_are_parsed() {
    assert_eq!(
        Command::parse("/interval 90", "sipsweet_bot").unwrap(),
        Command::Interval(90)
    );
    assert_eq!(
        Command::parse("/goal 2500", "sipsweet_bot").unwrap(),
        Command::Goal(2500)
    );
    assert!(Command::parse("/interval often", "sipsweet_bot").is_err());
}
