//! Demo wallet migration chain (v1 ..= v3).
//!
//! - v1: raw payload → `{ "config": <payload> }`
//! - v2: `config.provider` string → `{ "type": <string> }`
//! - v3: `config.selectedAccount` and `transactions` are always present

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use vaultmig_core::impls::FnMigration;
use vaultmig_core::typed::{self, Schema, Upgrade};
use vaultmig_core::{BoxError, Migration, SchemaVersion, VersionedState};

const DEFAULT_PROVIDER: &str = "mainnet";

pub fn migrations() -> Vec<Arc<dyn Migration>> {
    vec![
        wrap_config(),
        typed::boxed::<WalletV1, WalletV2, _>(ProviderObject),
        typed::boxed::<WalletV2, WalletV3, _>(AccountsAndHistory),
    ]
}

fn wrap_config() -> Arc<dyn Migration> {
    let version = SchemaVersion::new(1);
    FnMigration::new(version, move |state: VersionedState| async move {
        let data = match state.data {
            Some(Value::Object(map)) if map.contains_key("config") => Value::Object(map),
            Some(other) => json!({ "config": other }),
            None => json!({ "config": {} }),
        };
        Ok::<_, BoxError>(VersionedState::new(version, Some(data)))
    })
    .labeled("wrap-config")
    .into_arc()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WalletV1 {
    pub config: ConfigV1,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Value>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Schema for WalletV1 {
    const VERSION: SchemaVersion = SchemaVersion::new(1);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WalletV2 {
    pub config: ConfigV2,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigV2 {
    pub provider: Provider,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Schema for WalletV2 {
    const VERSION: SchemaVersion = SchemaVersion::new(2);
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WalletV3 {
    pub config: ConfigV3,
    pub transactions: Vec<Value>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigV3 {
    pub provider: Provider,
    pub selected_account: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Schema for WalletV3 {
    const VERSION: SchemaVersion = SchemaVersion::new(3);
}

struct ProviderObject;

#[async_trait]
impl Upgrade<WalletV1, WalletV2> for ProviderObject {
    async fn upgrade(&self, prev: WalletV1) -> Result<WalletV2, BoxError> {
        let provider = match prev.config.provider {
            None => Provider {
                kind: DEFAULT_PROVIDER.to_string(),
                rest: Map::new(),
            },
            Some(Value::String(kind)) => Provider {
                kind,
                rest: Map::new(),
            },
            Some(other) => serde_json::from_value(other)?,
        };

        Ok(WalletV2 {
            config: ConfigV2 {
                provider,
                rest: prev.config.rest,
            },
            rest: prev.rest,
        })
    }
}

struct AccountsAndHistory;

#[async_trait]
impl Upgrade<WalletV2, WalletV3> for AccountsAndHistory {
    async fn upgrade(&self, prev: WalletV2) -> Result<WalletV3, BoxError> {
        let mut config_rest = prev.config.rest;
        let selected_account = match config_rest.remove("selectedAccount") {
            Some(Value::String(account)) => Some(account),
            _ => None,
        };

        let mut rest = prev.rest;
        let transactions = match rest.remove("transactions") {
            Some(Value::Array(list)) => list,
            _ => Vec::new(),
        };

        Ok(WalletV3 {
            config: ConfigV3 {
                provider: prev.config.provider,
                selected_account,
                rest: config_rest,
            },
            transactions,
            rest,
        })
    }
}
