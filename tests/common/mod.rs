use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

pub fn press(user: i64, token: &str) -> String {
    format!(
        r#"{{"type": "button_press", "token": "{token}", "user": {user}, "user_name": "user-{user}"}}"#
    )
}

pub fn command(user: i64, name: &str, args: &[&str]) -> String {
    let args: Vec<String> = args.iter().map(|a| format!("\"{a}\"")).collect();
    format!(
        r#"{{"type": "command", "name": "{name}", "args": [{}], "user": {user}, "user_name": "user-{user}"}}"#,
        args.join(", ")
    )
}

pub fn text(user: i64, body: &str) -> String {
    format!(r#"{{"type": "text_message", "body": "{body}", "user": {user}}}"#)
}

pub fn write_script(path: &Path, lines: &[String]) -> Result<(), Error> {
    let mut file = File::create(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}

/// The event sequence for one complete purchase by `user`.
pub fn purchase_flow(user: i64, admin: i64) -> Vec<String> {
    vec![
        press(user, "add_apple"),
        press(user, "add_banana"),
        press(user, "checkout_order"),
        press(user, "set_address"),
        text(user, "Main St 1"),
        press(user, "pay"),
        press(user, "confirm_payment"),
        press(admin, &format!("approve_{user}")),
    ]
}
