use serde::{Deserialize, Serialize};

use crate::models::{Column, Order, OrderId};

/// Change feed entry, one per successful state mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum BoardMessage {
    OrderCreated {
        order: Order,
    },
    OrderUpdated {
        order: Order,
    },
    OrderMoved {
        order_id: OrderId,
        from_column: Column,
        to_column: Column,
    },
    OrderDeleted {
        order_id: OrderId,
    },
}

impl BoardMessage {
    pub fn order_id(&self) -> &OrderId {
        match self {
            Self::OrderCreated { order } | Self::OrderUpdated { order } => &order.id,
            Self::OrderMoved { order_id, .. } | Self::OrderDeleted { order_id } => order_id,
        }
    }
}
