//! 库存数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{validation_messages, CoreError};

pub type ProductId = Uuid;

/// 单个商品库存上限，保证汇总不会溢出 BIGINT
pub const MAX_QUANTITY: i64 = 1_000_000_000;

/// 解析路径中的商品 id，格式不对按不存在处理
pub fn parse_product_id(raw: &str) -> Result<ProductId, CoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CoreError::NotFound(format!("Product {} not found", raw)))
}

/// 商品，唯一的持久化实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub name_lower: String,
    pub price: f64,
    pub quantity: i64,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建或整体替换商品时写入的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 120, message = "Name is required (max 120 characters)."))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative."))]
    pub price: f64,

    #[validate(range(min = 0, max = 1000000000, message = "Quantity must be between 0 and 1000000000."))]
    pub quantity: i64,

    #[serde(default)]
    #[validate(length(max = 60, message = "Category must be at most 60 characters."))]
    pub category: Option<String>,
}

impl NewProduct {
    pub fn new(name: &str, price: f64, quantity: i64, category: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            price,
            quantity,
            category: category.map(str::to_string),
        }
        .normalized()
    }

    /// 去掉首尾空白，空分类视为未设置
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }

    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }
}

/// HTML 表单提交的原始字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub category: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: format!("{:.2}", product.price),
            quantity: product.quantity.to_string(),
            category: product.category.clone().unwrap_or_default(),
        }
    }

    /// 解析并校验表单，失败时返回全部错误信息
    pub fn parse(&self) -> Result<NewProduct, Vec<String>> {
        let mut errors = Vec::new();

        let price = match self.price.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                errors.push("Price must be a valid number.".to_string());
                None
            }
        };

        let quantity = match self.quantity.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                errors.push("Quantity must be a whole number.".to_string());
                None
            }
        };

        let category = Some(self.category.as_str());
        let candidate = NewProduct::new(
            &self.name,
            price.unwrap_or(0.0),
            quantity.unwrap_or(0),
            category,
        );

        if let Err(e) = candidate.validate() {
            let mut messages = validation_messages(&e);
            messages.append(&mut errors);
            errors = messages;
        }

        if errors.is_empty() {
            Ok(candidate)
        } else {
            Err(errors)
        }
    }
}

/// 列表行：商品加上低库存标记
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(flatten)]
    pub product: Product,
    pub low_stock: bool,
}

/// 存储层返回的聚合结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct InventoryStats {
    pub total_products: i64,
    pub total_quantity: i64,
    pub low_stock_count: i64,
    pub inventory_value: f64,
}

/// 看板页面数据
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: InventoryStats,
    pub threshold: i64,
    pub lowest_stock: Vec<Product>,
}

/// 列表页查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub notice: Option<String>,
}

impl ListQuery {
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// 未知的提示值直接忽略
    pub fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::parse)
    }
}

/// 重定向到列表页后展示一次的提示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    Created,
    Updated,
    Deleted,
    NotFound,
}

impl Notice {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created" => Some(Notice::Created),
            "updated" => Some(Notice::Updated),
            "deleted" => Some(Notice::Deleted),
            "not_found" => Some(Notice::NotFound),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Notice::Created => "created",
            Notice::Updated => "updated",
            Notice::Deleted => "deleted",
            Notice::NotFound => "not_found",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::Created => "Product created.",
            Notice::Updated => "Product updated.",
            Notice::Deleted => "Product deleted.",
            Notice::NotFound => "Product not found.",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Notice::NotFound)
    }
}
