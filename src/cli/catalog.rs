use storefront::{catalog::Catalog, pricing::to_money};

pub(crate) fn list(catalog: &Catalog) {
    if catalog.products().is_empty() {
        println!("the catalog has no products");
        return;
    }

    for product in catalog.products() {
        let colors: Vec<&str> = product
            .colors
            .iter()
            .map(|color| color.name.as_str())
            .collect();

        println!("id: {}", product.id);
        println!("title: {}", product.title);
        println!(
            "price: {}",
            to_money(product.unit_price, catalog.currency())
        );
        if colors.is_empty() {
            println!("colors: none");
        } else {
            println!("colors: {}", colors.join(", "));
        }
        println!();
    }
}
