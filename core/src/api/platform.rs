//! Upstream channel catalogs of the supplier platforms.

use serde::{Deserialize, Serialize};

use crate::client::Call;

/// An operator product offered inside a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProduct {
    pub product_id: i64,
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub channel_id: i64,
    pub channel_name: String,
    #[serde(default)]
    pub product_list: Vec<ChannelProduct>,
}

/// Channels of the Xianzhuanxia (闲赚侠) platform.
pub fn xianzhuanxia_channels() -> Call<Vec<Channel>> {
    Call::get("/platform/xianzhuanxia/channels")
}
