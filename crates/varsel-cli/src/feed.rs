//! Feed inspection command handlers for the CLI.
//!
//! Both commands force a fresh fetch instead of reading through the cache:
//! operators run them to see what the feed serves right now.

use varsel_core::catalog::{combination_key, ProductId, ProductVariations};
use varsel_core::money::format_price;
use varsel_feed::VariationProvider;

/// Fetch the feed and summarize it, or print one product's combination
/// table when `product` is given.
///
/// # Errors
///
/// Returns an error if the fetch fails or the requested product is not in
/// the feed.
pub(crate) async fn run_fetch(
    provider: &VariationProvider,
    currency_symbol: &str,
    product: Option<ProductId>,
) -> anyhow::Result<()> {
    let document = provider.refresh().await?;

    if document.is_empty() {
        println!("feed is empty");
        return Ok(());
    }

    if let Some(id) = product {
        let record = document
            .product(id)
            .ok_or_else(|| anyhow::anyhow!("product {id} not found in feed"))?;
        print_product(id, record, currency_symbol);
        return Ok(());
    }

    println!("{} product(s) in feed", document.len());
    println!();
    let header = format!(
        "{:<12}{:<9}{:<14}PURCHASABLE",
        "PRODUCT", "COLORS", "COMBINATIONS"
    );
    println!("{header}");
    for (id, record) in &document.products {
        let purchasable = record
            .combinations
            .values()
            .filter(|c| c.is_purchasable())
            .count();
        println!(
            "{:<12}{:<9}{:<14}{}",
            id,
            record.compatibility.len(),
            record.combinations.len(),
            purchasable
        );
    }

    Ok(())
}

/// Check one color/size pair against the live feed.
///
/// Prints the combination record when one exists, with the same verdict the
/// storefront would give: purchasable only when the size is listed under the
/// color and the record is available with stock.
///
/// # Errors
///
/// Returns an error if the fetch fails or the product is not in the feed.
pub(crate) async fn run_check(
    provider: &VariationProvider,
    currency_symbol: &str,
    id: ProductId,
    color: &str,
    size: &str,
) -> anyhow::Result<()> {
    let document = provider.refresh().await?;
    let record = document
        .product(id)
        .ok_or_else(|| anyhow::anyhow!("product {id} not found in feed"))?;

    let key = combination_key(color, size);
    let Some(combination) = record.combination(color, size) else {
        println!("{key}: no combination record");
        return Ok(());
    };

    let listed = record.sizes_for(color).iter().any(|s| s == size);
    println!("combination: {key}");
    println!("listed under {color}: {}", verdict(listed));
    println!(
        "price: {}",
        format_price(currency_symbol, combination.price)
    );
    println!("stock: {}", combination.stock);
    println!("available: {}", verdict(combination.available));
    println!("purchasable: {}", verdict(record.is_valid(color, size)));

    Ok(())
}

fn print_product(id: ProductId, record: &ProductVariations, currency_symbol: &str) {
    println!("Product {id}");
    for (color, sizes) in &record.compatibility {
        println!("  {color}: {}", sizes.join(", "));
    }
    println!();
    let header = format!(
        "{:<16}{:<12}{:<8}{:<11}PURCHASABLE",
        "COMBINATION", "PRICE", "STOCK", "AVAILABLE"
    );
    println!("{header}");
    for (key, combination) in &record.combinations {
        println!(
            "{:<16}{:<12}{:<8}{:<11}{}",
            key,
            format_price(currency_symbol, combination.price),
            combination.stock,
            verdict(combination.available),
            verdict(combination.is_purchasable()),
        );
    }
}

fn verdict(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
