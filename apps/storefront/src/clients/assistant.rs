//! # Sales Assistant
//!
//! Conversational product help. The boundary is one question in, one answer
//! out; whatever backs it (a scripted matcher today, a hosted model later)
//! must never leak its failures to the shopper, so the route swaps any error
//! for [`FALLBACK_REPLY`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use matera_core::format_price;

use super::{CatalogSource, ClientResult};

/// The apology shown whenever the assistant cannot answer.
pub const FALLBACK_REPLY: &str =
    "Disculpá, en este momento no puedo responderte. Escribinos por WhatsApp y te ayudamos con tu pedido.";

/// Answers shopper questions about the catalog.
#[async_trait]
pub trait SalesAssistant: Send + Sync {
    /// Answers one free-form question.
    async fn ask(&self, question: &str) -> ClientResult<String>;
}

/// Keyword-scripted assistant over the live catalog.
///
/// Not a language model: it matches a handful of intents (shipping, prices,
/// combos, payment) and otherwise points the shopper at WhatsApp. Good
/// enough for a curated shop, and it never invents a price.
pub struct ScriptedAssistant {
    catalog: Arc<dyn CatalogSource>,
    store_name: String,
}

impl ScriptedAssistant {
    /// Creates an assistant answering for `store_name` from `catalog`.
    pub fn new(catalog: Arc<dyn CatalogSource>, store_name: impl Into<String>) -> Self {
        ScriptedAssistant {
            catalog,
            store_name: store_name.into(),
        }
    }

    /// Finds products whose name appears in the question.
    async fn mentioned_products(&self, question: &str) -> ClientResult<Vec<String>> {
        let products = self.catalog.list_products().await?;

        let mut answers = Vec::new();
        for product in products {
            let name = product.name.to_lowercase();
            let mentioned = name
                .split_whitespace()
                .filter(|w| w.chars().count() > 3)
                .any(|w| question.contains(w));
            if mentioned {
                let stock_note = if product.in_stock() {
                    "en stock"
                } else {
                    "sin stock por ahora"
                };
                answers.push(format!(
                    "{}: {} ({})",
                    product.name,
                    format_price(product.price),
                    stock_note
                ));
            }
        }

        Ok(answers)
    }
}

#[async_trait]
impl SalesAssistant for ScriptedAssistant {
    async fn ask(&self, question: &str) -> ClientResult<String> {
        let q = question.to_lowercase();
        debug!(question = %question, "Assistant question");

        if q.contains("envío") || q.contains("envio") || q.contains("llega") {
            return Ok(format!(
                "Hacemos envíos a todo el país. En CABA y GBA llega en 24 a 48 horas; \
                 al interior entre 3 y 5 días hábiles. Coordinamos el envío por WhatsApp \
                 cuando confirmás tu pedido con {}.",
                self.store_name
            ));
        }

        if q.contains("pago") || q.contains("pagar") || q.contains("transferencia") {
            return Ok(
                "Aceptamos transferencia, efectivo contra entrega en CABA y todas las \
                 tarjetas por link de pago. Los detalles se coordinan por WhatsApp."
                    .to_string(),
            );
        }

        if q.contains("combo") {
            let combos = self.catalog.list_combos().await?;
            let mut reply = String::from("Tenemos estos combos armados:\n");
            for combo in combos {
                reply.push_str(&format!(
                    "• {} por {}\n",
                    combo.name,
                    format_price(combo.price)
                ));
            }
            reply.push_str("Todos salen más baratos que comprar las piezas por separado.");
            return Ok(reply);
        }

        // Price or availability questions about a concrete product
        let mentions = self.mentioned_products(&q).await?;
        if !mentions.is_empty() {
            return Ok(mentions.join("\n"));
        }

        if q.contains("precio") || q.contains("cuesta") || q.contains("sale") {
            return Ok(
                "Decime qué producto te interesa y te paso el precio. También podés ver \
                 todo el catálogo con precios en la tienda."
                    .to_string(),
            );
        }

        Ok(format!(
            "¡Hola! Soy el asistente de {}. Te puedo contar sobre yerbas, mates, \
             bombillas, termos y combos, o sobre envíos y formas de pago. ¿Qué estás buscando?",
            self.store_name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::SeedCatalog;

    fn assistant() -> ScriptedAssistant {
        ScriptedAssistant::new(Arc::new(SeedCatalog::new()), "Matera")
    }

    #[tokio::test]
    async fn test_shipping_question() {
        let reply = assistant().ask("¿Hacen envíos al interior?").await.unwrap();
        assert!(reply.contains("envíos"));
        assert!(reply.contains("Matera"));
    }

    #[tokio::test]
    async fn test_product_price_question() {
        let reply = assistant()
            .ask("¿Cuánto sale el mate imperial?")
            .await
            .unwrap();
        assert!(reply.contains("Mate Imperial Premium"));
        assert!(reply.contains("$ 45.000"));
    }

    #[tokio::test]
    async fn test_combo_question_lists_combos() {
        let reply = assistant().ask("¿Qué combos tienen?").await.unwrap();
        assert!(reply.contains("Combo Matero Inicial"));
        assert!(reply.contains("Combo Premium"));
    }

    #[tokio::test]
    async fn test_unknown_question_gets_greeting() {
        let reply = assistant().ask("hola").await.unwrap();
        assert!(reply.contains("asistente de Matera"));
    }
}
