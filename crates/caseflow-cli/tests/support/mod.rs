use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn new_command_with_temp_home() -> (Command, tempfile::TempDir) {
    let temp_home = tempfile::tempdir().expect("temp home");
    let command = new_command_in(temp_home.path());
    (command, temp_home)
}

pub fn new_command_in(home: &Path) -> Command {
    let binary = assert_cmd::cargo::cargo_bin!("caseflow");
    let mut command = Command::new(binary);
    command.env("HOME", home);
    command.env("XDG_CONFIG_HOME", home.join(".config"));
    command.env("XDG_DATA_HOME", home.join(".local/share"));
    command
}

pub fn write_valid_config(home: &Path, state_dir: &Path) {
    let config_dir = home.join(".config").join("caseflow");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(
        config_dir.join("config.toml"),
        format!(
            r#"
version = 1

[storage]
dir = "{}"
"#,
            state_dir.display()
        ),
    )
    .expect("write config");
}

pub fn write_config_with_currency(home: &Path, state_dir: &Path, currency: &str) {
    let config_dir = home.join(".config").join("caseflow");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(
        config_dir.join("config.toml"),
        format!(
            r#"
version = 1

[storage]
dir = "{}"

[storefront]
currency = "{currency}"
"#,
            state_dir.display()
        ),
    )
    .expect("write config");
}

pub fn write_invalid_config(home: &Path) {
    let config_dir = home.join(".config").join("caseflow");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(config_dir.join("config.toml"), "version = 2\n").expect("write config");
}
