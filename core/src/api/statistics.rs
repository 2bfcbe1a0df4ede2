//! Order statistics.

use serde::{Deserialize, Serialize};

use crate::client::Call;
use crate::isp::Isp;

/// Today's order count for one operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorStatistics {
    pub isp: i32,
    pub total_orders: i64,
}

impl OperatorStatistics {
    pub fn operator(&self) -> Option<Isp> {
        Isp::from_code(self.isp)
    }
}

pub fn operator() -> Call<Vec<OperatorStatistics>> {
    Call::get("/statistics/order/operator")
}
