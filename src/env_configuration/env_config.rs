use crate::common::*;

#[doc = r#"
    Reads a required environment variable. Without these the server cannot start,
    so a missing key is logged and turned into a panic.
"#]
fn get_env_or_panic(key: &str) -> String {
    match env::var(key) {
        Ok(val) => val,
        Err(_) => {
            let msg: String = format!("[ENV file read Error] '{}' must be set", key);
            error!("{}", msg);
            panic!("{}", msg);
        }
    }
}

#[doc = r#"
    Path of the server TOML file (font, chart style, netdata, ping and system sections).
    Resolved on first access only; nothing below `main` reads it.
"#]
pub static SERVER_CONFIG_PATH: once_lazy<String> =
    once_lazy::new(|| get_env_or_panic("SERVER_CONFIG_PATH"));
