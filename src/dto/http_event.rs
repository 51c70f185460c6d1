use crate::common::*;

#[doc = "One Lambda-proxy style request event. Only the fields the routes need are kept."]
#[derive(Debug, Clone, Default, Deserialize, Serialize, Getters, new)]
#[getset(get = "pub")]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    pub path: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl HttpEvent {
    #[doc = "Query parameter `key`, with empty values treated as absent."]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()?
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    #[doc = "Request body as text, base64-decoded first when the event says so."]
    pub fn decoded_body(&self) -> anyhow::Result<String> {
        let body: &str = self
            .body
            .as_deref()
            .ok_or_else(|| anyhow!("[HttpEvent->decoded_body] request body is missing"))?;

        if !self.is_base64_encoded {
            return Ok(body.to_string());
        }

        let bytes: Vec<u8> = BASE64
            .decode(body)
            .context("[HttpEvent->decoded_body] body is not valid base64")?;

        String::from_utf8(bytes).context("[HttpEvent->decoded_body] body is not valid UTF-8")
    }
}
