use anyhow::Result;
use serde_json::Value;

/// What a command produced.
#[derive(Debug)]
pub enum Output {
    Json(Value),
    Message(String),
}

pub fn print(out: &Output) -> Result<()> {
    match out {
        Output::Json(value) => println!("{}", serde_json::to_string_pretty(value)?),
        Output::Message(msg) => println!("{msg}"),
    }
    Ok(())
}

pub fn print_error(msg: &str) {
    eprintln!("error: {msg}");
}
