//! # WhatsApp Hand-off
//!
//! The storefront does not take payment. Checkout ends by opening a WhatsApp
//! conversation with the shop, pre-filled with the full order so the
//! customer only has to press send.
//!
//! ```text
//! ┌──────────┐   order_message()   ┌──────────────┐   order_link()   ┌────────────┐
//! │ Lead     │ ──────────────────► │ Spanish text │ ───────────────► │ wa.me URL  │
//! │ record   │                     │ of the order │                  │ ?text=...  │
//! └──────────┘                     └──────────────┘                  └────────────┘
//! ```

use url::Url;

use matera_core::{format_price, LeadRecord};

/// Renders the pre-filled order text.
///
/// Everything the shop needs to confirm the sale is in the message body:
/// lines with variant and quantity, totals, and the shipping details the
/// customer typed at checkout.
pub fn order_message(store_name: &str, lead: &LeadRecord) -> String {
    let mut msg = format!("¡Hola {}! 🧉 Quiero hacer este pedido:\n\n", store_name);

    for line in &lead.lines {
        match &line.variant {
            Some(variant) => {
                msg.push_str(&format!(
                    "• {} ({}) x{} = {}\n",
                    line.name,
                    variant,
                    line.quantity,
                    format_price(line.line_total())
                ));
            }
            None => {
                msg.push_str(&format!(
                    "• {} x{} = {}\n",
                    line.name,
                    line.quantity,
                    format_price(line.line_total())
                ));
            }
        }
    }

    msg.push('\n');
    msg.push_str(&format!("Subtotal: {}\n", format_price(lead.subtotal)));
    if let Some(ref discount) = lead.discount {
        msg.push_str(&format!(
            "Descuento ({}): -{}\n",
            discount.code,
            format_price(discount.amount)
        ));
    }
    msg.push_str(&format!("Total: {}\n\n", format_price(lead.total)));

    msg.push_str(&format!("Nombre: {}\n", lead.shipping.customer_name));
    msg.push_str(&format!("Teléfono: {}\n", lead.shipping.phone));
    msg.push_str(&format!("Dirección: {}\n", lead.shipping.address));
    if let Some(ref city) = lead.shipping.city {
        msg.push_str(&format!("Ciudad: {}\n", city));
    }
    if let Some(ref notes) = lead.shipping.notes {
        msg.push_str(&format!("Notas: {}\n", notes));
    }

    msg
}

/// Builds the `https://wa.me/<number>?text=...` deep link.
///
/// `number` must already be international digits only (config validates it).
pub fn order_link(number: &str, message: &str) -> Result<Url, url::ParseError> {
    let mut link = Url::parse(&format!("https://wa.me/{}", number))?;
    link.query_pairs_mut().append_pair("text", message);
    Ok(link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use matera_core::{CartLine, DiscountInfo, Money, OrderChannel, ShippingDetails};

    fn sample_lead() -> LeadRecord {
        LeadRecord {
            id: "lead-1".to_string(),
            channel: OrderChannel::Storefront,
            shipping: ShippingDetails {
                customer_name: "Marcos Peralta".to_string(),
                phone: "1144445555".to_string(),
                address: "Gurruchaga 1850".to_string(),
                city: Some("CABA".to_string()),
                notes: Some("Tocar timbre B".to_string()),
            },
            lines: vec![
                CartLine {
                    item_id: "mate-imperial".to_string(),
                    variant: Some("negro".to_string()),
                    name: "Mate Imperial Premium".to_string(),
                    unit_price: Money::from_pesos(45_000),
                    quantity: 1,
                    image_url: None,
                    added_at: Utc::now(),
                },
                CartLine {
                    item_id: "yerba-canarias-1kg".to_string(),
                    variant: None,
                    name: "Yerba Canarias 1kg".to_string(),
                    unit_price: Money::from_pesos(9_800),
                    quantity: 2,
                    image_url: None,
                    added_at: Utc::now(),
                },
            ],
            subtotal: Money::from_pesos(64_600),
            discount: Some(DiscountInfo {
                code: "RULETA4500".to_string(),
                amount: Money::from_pesos(4_500),
            }),
            total: Money::from_pesos(60_100),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_message_contains_lines_totals_and_shipping() {
        let msg = order_message("Matera", &sample_lead());

        assert!(msg.starts_with("¡Hola Matera! 🧉"));
        assert!(msg.contains("• Mate Imperial Premium (negro) x1 = $ 45.000"));
        assert!(msg.contains("• Yerba Canarias 1kg x2 = $ 19.600"));
        assert!(msg.contains("Subtotal: $ 64.600"));
        assert!(msg.contains("Descuento (RULETA4500): -$ 4.500"));
        assert!(msg.contains("Total: $ 60.100"));
        assert!(msg.contains("Nombre: Marcos Peralta"));
        assert!(msg.contains("Dirección: Gurruchaga 1850"));
        assert!(msg.contains("Ciudad: CABA"));
        assert!(msg.contains("Notas: Tocar timbre B"));
    }

    #[test]
    fn test_message_without_discount_or_city() {
        let mut lead = sample_lead();
        lead.discount = None;
        lead.shipping.city = None;
        lead.shipping.notes = None;

        let msg = order_message("Matera", &lead);

        assert!(!msg.contains("Descuento"));
        assert!(!msg.contains("Ciudad:"));
        assert!(!msg.contains("Notas:"));
        assert!(msg.contains("Total:"));
    }

    #[test]
    fn test_link_targets_number_and_round_trips_text() {
        let msg = order_message("Matera", &sample_lead());
        let link = order_link("5491123456789", &msg).unwrap();

        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/5491123456789");

        // The query must decode back to the exact message
        let (key, text) = link.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(text, msg);
    }
}
