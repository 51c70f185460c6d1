use crate::common::*;

#[doc = r#"
    Reads a TOML file and deserializes it into `T`.

    # Arguments
    * `file_path` - path of the TOML file to read

    # Errors
    Fails when the file cannot be read or its content does not match `T`.
"#]
pub fn read_toml_from_file<T: DeserializeOwned>(file_path: &str) -> Result<T, anyhow::Error> {
    let toml_content: String = fs::read_to_string(file_path)?;
    let toml: T = toml::from_str(&toml_content)?;

    Ok(toml)
}

#[doc = "Serializes `input_struct` into a compact JSON string, mainly for debug logging."]
pub fn convert_json_from_struct<T: Serialize>(input_struct: &T) -> Result<String, anyhow::Error> {
    serde_json::to_string(input_struct).map_err(|err| {
        anyhow!(
            "[Error][convert_json_from_struct()] Failed to serialize struct to JSON: {}",
            err
        )
    })
}

#[doc = "Reads a whole binary file, such as the chart font."]
pub fn read_bytes_from_file(file_path: &str) -> Result<Vec<u8>, anyhow::Error> {
    fs::read(file_path).with_context(|| format!("[Error][read_bytes_from_file()] cannot read '{file_path}'"))
}
