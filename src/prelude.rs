pub use std::{
    collections::HashMap,
    env, fs,
    io::Write,
    str::FromStr,
    sync::Arc,
};

pub use tokio::time::Duration;

pub use anyhow::{Context, anyhow};
pub use async_trait::async_trait;
pub use derive_new::new;
pub use dotenv::dotenv;
pub use futures::future::join_all;
pub use getset::Getters;
pub use log::{debug, error, info, warn};
pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
pub use serde_json::{Value, json};
