//! Conversions from wire-format nodes to domain types.

use crate::shopify::types::{Checkout, Money, Product, ProductImage, ProductVariant};

use super::wire;

pub fn convert_product(node: wire::ProductNode) -> Product {
    Product {
        id: node.id,
        handle: node.handle,
        title: node.title,
        description: node.description,
        images: node
            .images
            .edges
            .into_iter()
            .map(|edge| convert_image(edge.node))
            .collect(),
        variants: node
            .variants
            .edges
            .into_iter()
            .map(|edge| convert_variant(edge.node))
            .collect(),
        available_for_sale: node.available_for_sale,
        total_inventory: node.total_inventory.unwrap_or(0),
    }
}

fn convert_image(node: wire::ImageNode) -> ProductImage {
    ProductImage {
        url: node.url,
        alt_text: node.alt_text,
    }
}

fn convert_variant(node: wire::VariantNode) -> ProductVariant {
    ProductVariant {
        id: node.id,
        title: node.title,
        price: convert_money(node.price),
        compare_at_price: node.compare_at_price.map(convert_money),
        available_for_sale: node.available_for_sale,
        quantity_available: node.quantity_available,
    }
}

fn convert_money(node: wire::MoneyNode) -> Money {
    Money {
        amount: node.amount,
        currency_code: node.currency_code,
    }
}

pub fn convert_checkout(node: wire::CheckoutNode) -> Checkout {
    Checkout {
        id: node.id,
        web_url: node.web_url,
    }
}
