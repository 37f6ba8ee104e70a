//! Fixed demo catalog used to seed empty stores.

use crate::product::{Product, Rarity};

struct DemoSpec {
    title: &'static str,
    slug: &'static str,
    description: &'static str,
    price: f64,
    original_price: Option<f64>,
    category: &'static str,
    collection: &'static str,
    rarity: Rarity,
    total_edition: Option<i64>,
    colors: &'static [&'static str],
    featured: bool,
}

const DEMO: [DemoSpec; 8] = [
    DemoSpec {
        title: "Midnight Iris",
        slug: "midnight-iris",
        description: "Limited tee with glowing astral iris.",
        price: 89.0,
        original_price: None,
        category: "tees",
        collection: "drop-001",
        rarity: Rarity::Limited,
        total_edition: Some(144),
        colors: &["black", "white"],
        featured: true,
    },
    DemoSpec {
        title: "Void Seraph",
        slug: "void-seraph",
        description: "Oversized tee with neon seraphic glitch halo.",
        price: 109.0,
        original_price: None,
        category: "tees",
        collection: "drop-001",
        rarity: Rarity::Ultra,
        total_edition: Some(88),
        colors: &["black"],
        featured: true,
    },
    DemoSpec {
        title: "Neon Oracle",
        slug: "neon-oracle",
        description: "Heavyweight hoodie with a hand-drawn oracle eye in reflective ink.",
        price: 149.0,
        original_price: Some(179.0),
        category: "hoodies",
        collection: "drop-002",
        rarity: Rarity::Grail,
        total_edition: Some(33),
        colors: &["black", "bone"],
        featured: true,
    },
    DemoSpec {
        title: "Static Bloom",
        slug: "static-bloom",
        description: "Everyday tee with a pixel-torn rose print.",
        price: 49.0,
        original_price: None,
        category: "tees",
        collection: "core",
        rarity: Rarity::Common,
        total_edition: None,
        colors: &["white", "sand"],
        featured: false,
    },
    DemoSpec {
        title: "Chrome Halo Cap",
        slug: "chrome-halo-cap",
        description: "Six-panel cap with embroidered chrome halo.",
        price: 39.0,
        original_price: None,
        category: "accessories",
        collection: "core",
        rarity: Rarity::Common,
        total_edition: None,
        colors: &["black"],
        featured: false,
    },
    DemoSpec {
        title: "Eclipse Relic Hoodie",
        slug: "eclipse-relic-hoodie",
        description: "Garment-dyed hoodie with a split-sun relic on the back.",
        price: 139.0,
        original_price: Some(159.0),
        category: "hoodies",
        collection: "drop-002",
        rarity: Rarity::Limited,
        total_edition: Some(120),
        colors: &["charcoal"],
        featured: false,
    },
    DemoSpec {
        title: "Phantom Choir Longsleeve",
        slug: "phantom-choir-longsleeve",
        description: "Longsleeve with a choir of phantoms running down both arms.",
        price: 79.0,
        original_price: None,
        category: "longsleeves",
        collection: "drop-001",
        rarity: Rarity::Ultra,
        total_edition: Some(66),
        colors: &["black", "white"],
        featured: false,
    },
    DemoSpec {
        title: "Aurora Sigil Tote",
        slug: "aurora-sigil-tote",
        description: "Canvas tote screen-printed with an aurora sigil.",
        price: 29.0,
        original_price: None,
        category: "accessories",
        collection: "core",
        rarity: Rarity::Common,
        total_edition: None,
        colors: &["natural"],
        featured: false,
    },
];

/// The demo products, always in the same order.
pub fn demo_catalog() -> Vec<Product> {
    DEMO.iter().map(to_product).collect()
}

fn to_product(spec: &DemoSpec) -> Product {
    let sized = !matches!(spec.category, "accessories");

    let mut product = Product::new(spec.title, spec.slug, spec.price);
    product.description = spec.description.to_string();
    product.original_price = spec.original_price;
    product.categories = vec![spec.category.to_string()];
    product.collections = vec![spec.collection.to_string()];
    product.rarity = spec.rarity;
    product.total_edition = spec.total_edition;
    product.images = vec![format!("/products/{}-1.jpg", spec.slug)];
    product.colors = spec.colors.iter().map(|c| c.to_string()).collect();
    product.featured = spec.featured;
    if sized {
        product.sizes = ["S", "M", "L", "XL"].iter().map(|s| s.to_string()).collect();
    } else {
        product.sizes = vec!["OS".to_string()];
        product.inventory = [("OS".to_string(), 10)].into_iter().collect();
    }
    product
}
