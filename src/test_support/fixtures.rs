//! Canned manifests shared by unit tests.

use std::path::{Path, PathBuf};

use crate::core::{Manifest, MANIFEST_NAME};

/// A small but complete manifest: two modules, one external dependency,
/// one of every logic collection, and the project-wide catalogs.
pub const SAMPLE_MANIFEST: &str = r#"{
  "project": {
    "name": "商城",
    "version": "1.2.0",
    "description": "Online shop",
    "repository": "https://example.com/shop.git",
    "updatedAt": "2024-05-01"
  },
  "modules": [
    {
      "id": "order",
      "name": "订单",
      "description": "Order lifecycle",
      "tags": ["core"],
      "dependencies": ["payment", "inventory"],
      "codeRefs": [{"file": "src/order/service.ts"}],
      "flows": [
        {
          "id": "create-order",
          "name": "创建订单",
          "trigger": "POST /orders",
          "codeRef": {"file": "src/order/service.ts", "function": "create", "line": 42},
          "steps": [
            {"order": 2, "name": "pay", "rules": ["stock-check"]},
            {"order": 1, "name": "create", "description": "persist draft"}
          ]
        }
      ],
      "rules": [
        {
          "id": "stock-check",
          "name": "库存校验",
          "priority": "high",
          "category": "validation",
          "constraints": ["stock >= quantity"],
          "effects": ["reserve stock"]
        }
      ],
      "stateMachines": [
        {
          "id": "order-status",
          "name": "订单状态",
          "entity": "order",
          "states": [
            {"id": "pending", "name": "待支付", "initial": true},
            {"id": "paid", "name": "已支付"},
            {"id": "closed", "name": "已关闭", "final": true}
          ],
          "transitions": [
            {"from": "pending", "to": "paid", "trigger": "pay"},
            {"from": "paid", "to": "closed", "trigger": "close"}
          ]
        }
      ],
      "pseudocodes": [
        {
          "id": "create",
          "name": "createOrder",
          "signature": "createOrder(cart: Cart): Order",
          "params": [{"name": "cart", "type": "Cart"}],
          "returns": "Order",
          "steps": [
            {"indent": 0, "type": "condition", "text": "if cart is empty"},
            {"indent": 1, "type": "error", "text": "throw EmptyCart"},
            {"indent": 0, "type": "call", "text": "inventory.reserve(cart)"}
          ],
          "calls": [{"type": "db", "target": "orders"}]
        }
      ]
    },
    {
      "id": "payment",
      "name": "支付",
      "description": "Payment gateway"
    }
  ],
  "entities": [
    {"id": "order", "name": "订单", "keyFields": ["id", "status"], "statuses": ["pending", "paid", "closed"]}
  ],
  "dataModels": [
    {"id": "orders", "name": "orders", "fields": [{"name": "id", "type": "uuid", "description": "主键"}]}
  ],
  "glossary": {
    "sku": {"term": "SKU", "description": "Stock keeping unit"}
  },
  "changelog": [
    {"date": "2024-05-01", "type": "added", "summary": "初始版本"}
  ]
}"#;

/// Decoded [`SAMPLE_MANIFEST`].
pub fn sample_manifest() -> Manifest {
    Manifest::from_json(SAMPLE_MANIFEST).expect("sample manifest decodes")
}

/// Write [`SAMPLE_MANIFEST`] into `dir` under the canonical file name.
pub fn write_sample_manifest(dir: &Path) -> PathBuf {
    let path = dir.join(MANIFEST_NAME);
    std::fs::write(&path, SAMPLE_MANIFEST).expect("write sample manifest");
    path
}
