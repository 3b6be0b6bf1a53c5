//! # Catalog Source
//!
//! Read-side boundary for everything the shop sells. Routes never touch a
//! concrete catalog; they go through [`CatalogSource`] so the backing data
//! can move to a headless CMS later without touching the cart or checkout.
//!
//! The storefront ships with [`SeedCatalog`], the curated in-memory table
//! the shop actually sells from.

use async_trait::async_trait;

use matera_core::{Combo, Money, Product};

use super::ClientResult;

/// Read access to products and combos.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All products, in display order.
    async fn list_products(&self) -> ClientResult<Vec<Product>>;

    /// All combos, in display order.
    async fn list_combos(&self) -> ClientResult<Vec<Combo>>;

    /// One product by id, `None` when the id is unknown.
    async fn get_product(&self, id: &str) -> ClientResult<Option<Product>>;

    /// One combo by id, `None` when the id is unknown.
    async fn get_combo(&self, id: &str) -> ClientResult<Option<Combo>>;
}

/// The built-in catalog.
///
/// Seeded once at startup; lookups are linear scans over a table of a few
/// dozen items, which is the whole point of a curated shop.
pub struct SeedCatalog {
    products: Vec<Product>,
    combos: Vec<Combo>,
}

impl SeedCatalog {
    /// Builds the catalog with the standard seed data.
    pub fn new() -> Self {
        SeedCatalog {
            products: seed_products(),
            combos: seed_combos(),
        }
    }
}

impl Default for SeedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for SeedCatalog {
    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn list_combos(&self) -> ClientResult<Vec<Combo>> {
        Ok(self.combos.clone())
    }

    async fn get_product(&self, id: &str) -> ClientResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn get_combo(&self, id: &str) -> ClientResult<Option<Combo>> {
        Ok(self.combos.iter().find(|c| c.id == id).cloned())
    }
}

/// The product table. Prices in whole pesos, stock as last counted.
fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "mate-imperial".to_string(),
            name: "Mate Imperial Premium".to_string(),
            price: Money::from_pesos(45_000),
            stock: 12,
            category: "mates".to_string(),
            description: "Calabaza forrada en cuero con virola de alpaca cincelada a mano."
                .to_string(),
            image_url: "/images/mate-imperial.webp".to_string(),
            colors: Some(vec![
                "negro".to_string(),
                "suela".to_string(),
                "bordó".to_string(),
            ]),
        },
        Product {
            id: "mate-torpedo".to_string(),
            name: "Mate Torpedo Forrado".to_string(),
            price: Money::from_pesos(28_500),
            stock: 20,
            category: "mates".to_string(),
            description: "Calabaza torpedo forrada en cuero vacuno, boca de alpaca.".to_string(),
            image_url: "/images/mate-torpedo.webp".to_string(),
            colors: Some(vec!["negro".to_string(), "marrón".to_string()]),
        },
        Product {
            id: "mate-camionero".to_string(),
            name: "Mate Camionero".to_string(),
            price: Money::from_pesos(18_000),
            stock: 35,
            category: "mates".to_string(),
            description: "El clásico de boca ancha, forrado en cuero crudo.".to_string(),
            image_url: "/images/mate-camionero.webp".to_string(),
            colors: None,
        },
        Product {
            id: "yerba-canarias-1kg".to_string(),
            name: "Yerba Canarias 1kg".to_string(),
            price: Money::from_pesos(9_800),
            stock: 60,
            category: "yerbas".to_string(),
            description: "Sin palo, molienda fina, la preferida del litoral.".to_string(),
            image_url: "/images/yerba-canarias.webp".to_string(),
            colors: None,
        },
        Product {
            id: "yerba-playadito-1kg".to_string(),
            name: "Yerba Playadito 1kg".to_string(),
            price: Money::from_pesos(8_200),
            stock: 80,
            category: "yerbas".to_string(),
            description: "Suave con palo, de la cooperativa de Colonia Liebig.".to_string(),
            image_url: "/images/yerba-playadito.webp".to_string(),
            colors: None,
        },
        Product {
            id: "yerba-taragui-1kg".to_string(),
            name: "Yerba Taragüí 1kg".to_string(),
            price: Money::from_pesos(7_900),
            stock: 75,
            category: "yerbas".to_string(),
            description: "Con palo, el sabor intenso de Corrientes.".to_string(),
            image_url: "/images/yerba-taragui.webp".to_string(),
            colors: None,
        },
        Product {
            id: "yerba-merced-campo-500g".to_string(),
            name: "Yerba La Merced Campo y Monte 500g".to_string(),
            price: Money::from_pesos(6_500),
            stock: 0,
            category: "yerbas".to_string(),
            description: "Estacionada en campo y monte, molienda gruesa.".to_string(),
            image_url: "/images/yerba-merced.webp".to_string(),
            colors: None,
        },
        Product {
            id: "bombilla-pico-loro".to_string(),
            name: "Bombilla Pico de Loro Alpaca".to_string(),
            price: Money::from_pesos(12_000),
            stock: 40,
            category: "bombillas".to_string(),
            description: "Alpaca maciza con filtro desmontable, no se tapa.".to_string(),
            image_url: "/images/bombilla-pico-loro.webp".to_string(),
            colors: None,
        },
        Product {
            id: "bombilla-chata".to_string(),
            name: "Bombilla Chata Acero".to_string(),
            price: Money::from_pesos(5_500),
            stock: 90,
            category: "bombillas".to_string(),
            description: "Acero quirúrgico, la de todos los días.".to_string(),
            image_url: "/images/bombilla-chata.webp".to_string(),
            colors: None,
        },
        Product {
            id: "termo-lumilagro-1l".to_string(),
            name: "Termo Lumilagro Luminox 1L".to_string(),
            price: Money::from_pesos(32_000),
            stock: 25,
            category: "termos".to_string(),
            description: "El termo argentino de siempre, pico cebador.".to_string(),
            image_url: "/images/termo-lumilagro.webp".to_string(),
            colors: Some(vec!["verde".to_string(), "azul".to_string()]),
        },
        Product {
            id: "termo-acero-1l".to_string(),
            name: "Termo Acero Media Manija 1L".to_string(),
            price: Money::from_pesos(48_000),
            stock: 15,
            category: "termos".to_string(),
            description: "Doble capa de acero inoxidable, 24 horas de frío o calor.".to_string(),
            image_url: "/images/termo-acero.webp".to_string(),
            colors: Some(vec!["acero".to_string(), "negro".to_string()]),
        },
        Product {
            id: "matera-cuero".to_string(),
            name: "Matera de Cuero".to_string(),
            price: Money::from_pesos(38_000),
            stock: 10,
            category: "accesorios".to_string(),
            description: "Bolso matero artesanal con espacio para termo, mate y yerbera."
                .to_string(),
            image_url: "/images/matera-cuero.webp".to_string(),
            colors: Some(vec!["suela".to_string(), "negro".to_string()]),
        },
        Product {
            id: "yerbera-azucarera".to_string(),
            name: "Set Yerbera y Azucarera".to_string(),
            price: Money::from_pesos(14_500),
            stock: 30,
            category: "accesorios".to_string(),
            description: "Lata pintada a mano con pico vertedor, juego de dos.".to_string(),
            image_url: "/images/yerbera-azucarera.webp".to_string(),
            colors: None,
        },
    ]
}

/// The combo table. Combo prices are set by hand, under the sum of parts.
fn seed_combos() -> Vec<Combo> {
    vec![
        Combo {
            id: "combo-matero-inicial".to_string(),
            name: "Combo Matero Inicial".to_string(),
            price: Money::from_pesos(29_900),
            product_ids: vec![
                "mate-camionero".to_string(),
                "bombilla-chata".to_string(),
                "yerba-playadito-1kg".to_string(),
            ],
            description: "Todo para arrancar: mate camionero, bombilla de acero y un kilo de Playadito."
                .to_string(),
            image_url: "/images/combo-inicial.webp".to_string(),
        },
        Combo {
            id: "combo-premium".to_string(),
            name: "Combo Premium".to_string(),
            price: Money::from_pesos(89_900),
            product_ids: vec![
                "mate-imperial".to_string(),
                "bombilla-pico-loro".to_string(),
                "termo-acero-1l".to_string(),
                "yerba-canarias-1kg".to_string(),
            ],
            description: "Mate imperial, bombilla de alpaca, termo de acero y Canarias para estrenarlo."
                .to_string(),
            image_url: "/images/combo-premium.webp".to_string(),
        },
        Combo {
            id: "combo-regalo".to_string(),
            name: "Combo Regalo".to_string(),
            price: Money::from_pesos(49_900),
            product_ids: vec![
                "mate-torpedo".to_string(),
                "bombilla-pico-loro".to_string(),
                "yerbera-azucarera".to_string(),
            ],
            description: "Para regalar: mate torpedo, bombilla de alpaca y set yerbera."
                .to_string(),
            image_url: "/images/combo-regalo.webp".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_catalog_lists_products() {
        let catalog = SeedCatalog::new();
        let products = catalog.list_products().await.unwrap();

        assert!(!products.is_empty());
        assert!(products.iter().any(|p| p.category == "yerbas"));
        assert!(products.iter().any(|p| p.category == "mates"));
    }

    #[tokio::test]
    async fn test_get_product_by_id() {
        let catalog = SeedCatalog::new();

        let mate = catalog.get_product("mate-imperial").await.unwrap();
        let mate = mate.unwrap();
        assert_eq!(mate.name, "Mate Imperial Premium");
        assert_eq!(mate.price, Money::from_pesos(45_000));
        assert!(mate.in_stock());

        let missing = catalog.get_product("no-such-item").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_combo_references_resolve() {
        let catalog = SeedCatalog::new();
        let combos = catalog.list_combos().await.unwrap();

        assert!(!combos.is_empty());
        for combo in combos {
            for product_id in &combo.product_ids {
                let product = catalog.get_product(product_id).await.unwrap();
                assert!(
                    product.is_some(),
                    "combo {} references unknown product {}",
                    combo.id,
                    product_id
                );
            }
        }
    }

    #[tokio::test]
    async fn test_out_of_stock_product_exists() {
        // The storefront must render sold-out items, so the seed keeps one
        let catalog = SeedCatalog::new();
        let agotada = catalog
            .get_product("yerba-merced-campo-500g")
            .await
            .unwrap()
            .unwrap();
        assert!(!agotada.in_stock());
    }
}
