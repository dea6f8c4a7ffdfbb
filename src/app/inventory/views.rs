//! 面板 HTML 视图

use axum::http::StatusCode;
use std::fmt::Write;

use super::model::{Dashboard, Notice, Product, ProductForm, ProductId, ProductRow};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;color:#222}\
nav a{margin-right:1rem}\
table{border-collapse:collapse;margin-top:1rem}\
th,td{border:1px solid #ccc;padding:.4rem .8rem;text-align:left}\
tr.low-stock{background:#fde2e2}\
.notice{padding:.6rem;margin:1rem 0;background:#e2f5e5}\
.notice.error,.errors{background:#fde2e2;padding:.6rem}\
.metrics div{display:inline-block;margin-right:2rem}\
form.inline{display:inline}";

/// 表单用途：新建或编辑
#[derive(Debug, Clone, Copy)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Gestio</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/panel/products\">Products</a><a href=\"/panel/products/new\">New product</a>\
         <a href=\"/panel/dashboard\">Dashboard</a><a href=\"/panel/alerts\">Alerts</a></nav>\n\
         <h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn product_list(
    rows: &[ProductRow],
    threshold: i64,
    search: Option<&str>,
    notice: Option<Notice>,
) -> String {
    let mut body = String::new();

    if let Some(notice) = notice {
        let class = if notice.is_error() { "notice error" } else { "notice" };
        let _ = write!(body, "<p class=\"{}\">{}</p>", class, notice.message());
    }

    let _ = write!(
        body,
        "<form method=\"get\" action=\"/panel/products\">\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search by name\">\
         <button type=\"submit\">Search</button></form>",
        escape(search.unwrap_or_default())
    );

    if rows.is_empty() {
        body.push_str("<p>No products found.</p>");
        return layout("Products", &body);
    }

    let _ = write!(
        body,
        "<p>Rows highlighted have fewer than {} units in stock.</p>\
         <table><thead><tr><th>Name</th><th>Category</th><th>Price</th>\
         <th>Stock</th><th>Status</th><th></th></tr></thead><tbody>",
        threshold
    );

    for row in rows {
        let p = &row.product;
        let (class, status) = if row.low_stock {
            (" class=\"low-stock\"", "Low stock")
        } else {
            ("", "OK")
        };
        let _ = write!(
            body,
            "<tr{class}><td>{name}</td><td>{category}</td><td>{price}</td><td>{qty}</td>\
             <td>{status}</td><td><a href=\"/panel/products/{id}/edit\">Edit</a> \
             <form class=\"inline\" method=\"post\" action=\"/panel/products/{id}/delete\">\
             <button type=\"submit\">Delete</button></form></td></tr>",
            class = class,
            name = escape(&p.name),
            category = escape(p.category.as_deref().unwrap_or("")),
            price = money(p.price),
            qty = p.quantity,
            status = status,
            id = p.id,
        );
    }
    body.push_str("</tbody></table>");

    layout("Products", &body)
}

pub fn product_form(mode: FormMode, form: &ProductForm, errors: &[String]) -> String {
    let (title, action) = match mode {
        FormMode::Create => ("New product".to_string(), "/panel/products/new".to_string()),
        FormMode::Edit(id) => ("Edit product".to_string(), format!("/panel/products/{}/edit", id)),
    };

    let mut body = String::new();
    if !errors.is_empty() {
        body.push_str("<ul class=\"errors\">");
        for error in errors {
            let _ = write!(body, "<li>{}</li>", escape(error));
        }
        body.push_str("</ul>");
    }

    let _ = write!(
        body,
        "<form method=\"post\" action=\"{action}\">\
         <p><label>Name <input type=\"text\" name=\"name\" value=\"{name}\" required></label></p>\
         <p><label>Price <input type=\"text\" name=\"price\" value=\"{price}\"></label></p>\
         <p><label>Stock <input type=\"text\" name=\"quantity\" value=\"{quantity}\"></label></p>\
         <p><label>Category <input type=\"text\" name=\"category\" value=\"{category}\"></label></p>\
         <p><button type=\"submit\">Save</button> <a href=\"/panel/products\">Cancel</a></p>\
         </form>",
        action = action,
        name = escape(&form.name),
        price = escape(&form.price),
        quantity = escape(&form.quantity),
        category = escape(&form.category),
    );

    layout(&title, &body)
}

pub fn dashboard(dashboard: &Dashboard) -> String {
    let stats = &dashboard.stats;
    let mut body = format!(
        "<section class=\"metrics\">\
         <div><strong>{}</strong> products</div>\
         <div><strong>{}</strong> units in stock</div>\
         <div><strong>{}</strong> below threshold ({})</div>\
         <div>Inventory value <strong>{}</strong></div></section>",
        stats.total_products,
        stats.total_quantity,
        stats.low_stock_count,
        dashboard.threshold,
        money(stats.inventory_value),
    );

    body.push_str("<h2>Lowest stock</h2>");
    body.push_str(&stock_table(&dashboard.lowest_stock));

    layout("Dashboard", &body)
}

pub fn alerts(products: &[Product], threshold: i64) -> String {
    let mut body = format!(
        "<p>Products with fewer than {} units in stock, lowest first.</p>",
        threshold
    );
    body.push_str(&stock_table(products));
    layout("Low stock alerts", &body)
}

fn stock_table(products: &[Product]) -> String {
    if products.is_empty() {
        return "<p>No products below the threshold.</p>".to_string();
    }

    let mut table = String::from(
        "<table><thead><tr><th>Name</th><th>Stock</th><th></th></tr></thead><tbody>",
    );
    for p in products {
        let _ = write!(
            table,
            "<tr class=\"low-stock\"><td>{}</td><td>{}</td>\
             <td><a href=\"/panel/products/{}/edit\">Restock</a></td></tr>",
            escape(&p.name),
            p.quantity,
            p.id
        );
    }
    table.push_str("</tbody></table>");
    table
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<p class=\"notice error\">{}</p><p><a href=\"/panel/products\">Back to products</a></p>",
        escape(message)
    );
    layout(title, &body)
}
