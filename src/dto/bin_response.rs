use crate::common::*;

#[doc = r#"
    Lambda-proxy style response. Images travel base64-encoded with `isBase64Encoded: true`,
    errors as a JSON `{"message": ...}` body.
"#]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
#[serde(rename_all = "camelCase")]
pub struct BinResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl BinResponse {
    pub fn binary(content_type: &str, bytes: &[u8]) -> Self {
        Self {
            status_code: 200,
            headers: HashMap::from([("Content-Type".to_string(), content_type.to_string())]),
            body: BASE64.encode(bytes),
            is_base64_encoded: true,
        }
    }

    pub fn png(bytes: &[u8]) -> Self {
        Self::binary("image/png", bytes)
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            body: json!({ "message": message.into() }).to_string(),
            is_base64_encoded: false,
        }
    }
}
