//! Per-profession base prices

use admin_gateway::ApiRequest;
use serde::Serialize;
use tracing::info;

use crate::client::AdminApi;
use crate::error::Result;
use crate::types::Profession;

const UPSERT_PATH: &str = "/AdminPrivileges/upsert-base-price";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BasePriceBody {
    profession_id: u8,
    base_price: u64,
}

impl AdminApi {
    /// Create or replace the base price of a profession.
    pub async fn set_base_price(&self, profession: Profession, base_price: u64) -> Result<()> {
        let body = BasePriceBody {
            profession_id: profession.code(),
            base_price,
        };
        self.command(
            ApiRequest::post(UPSERT_PATH).json(&body)?,
            "Failed to update base price.",
        )
        .await?;
        info!(%profession, base_price, "base price saved");
        Ok(())
    }
}
