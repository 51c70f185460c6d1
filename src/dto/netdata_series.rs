use crate::common::*;

#[doc = r#"
    `jsonwrap` answer of the metrics source. `result.labels[0]` is the time column and
    `result.data` rows are newest first: `[unix_secs, value_1, value_2, ...]`.
"#]
#[derive(Debug, Clone, Deserialize, Serialize, Getters, new)]
#[getset(get = "pub")]
pub struct NetdataSeries {
    pub points: usize,
    pub result: NetdataResult,
}

#[derive(Debug, Clone, Deserialize, Serialize, Getters, new)]
#[getset(get = "pub")]
pub struct NetdataResult {
    pub labels: Vec<String>,
    pub data: Vec<Vec<Option<f64>>>,
}
