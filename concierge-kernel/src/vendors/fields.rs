//! Extraction tolérante de champs depuis les payloads vendeurs.
//!
//! Les PMS renvoient le même attribut sous des noms différents (PascalCase,
//! snake_case, camelCase) et des types variables (nombre ou chaîne). Les
//! helpers ci-dessous testent une liste d'alias en ordre de priorité et
//! renvoient None quand rien n'est exploitable, jamais d'erreur.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Vue tableau sur une réponse brute. Non-tableau (null, objet, absent)
/// -> tranche vide.
pub fn records(raw: &Value) -> &[Value] {
    raw.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Traverse un alias éventuellement pointé ("TotalAmount.Value").
fn lookup<'a>(item: &'a Value, alias: &str) -> Option<&'a Value> {
    let mut current = item;
    for segment in alias.split('.') {
        current = current.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Premier alias présent avec une valeur chaîne non vide (les nombres
/// sont acceptés et convertis, certains PMS renvoient les ids en numérique).
pub fn pick_str(item: &Value, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| match lookup(item, alias)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Premier alias numérique (ou chaîne numérique) présent.
pub fn pick_f64(item: &Value, aliases: &[&str]) -> Option<f64> {
    aliases.iter().find_map(|alias| match lookup(item, alias)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    })
}

pub fn pick_i64(item: &Value, aliases: &[&str]) -> Option<i64> {
    aliases.iter().find_map(|alias| match lookup(item, alias)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    })
}

pub fn pick_u32(item: &Value, aliases: &[&str]) -> Option<u32> {
    pick_i64(item, aliases).and_then(|v| u32::try_from(v).ok())
}

pub fn pick_bool(item: &Value, aliases: &[&str]) -> Option<bool> {
    aliases
        .iter()
        .find_map(|alias| lookup(item, alias)?.as_bool())
}

/// Horodatage par défaut des champs de dates absents.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_on_non_array() {
        assert!(records(&json!(null)).is_empty());
        assert!(records(&json!({"data": []})).is_empty());
        assert_eq!(records(&json!([1, 2])).len(), 2);
    }

    #[test]
    fn test_pick_str_priority_order() {
        let item = json!({"ReservationId": "R-42", "id": "fallback"});
        assert_eq!(
            pick_str(&item, &["ReservationId", "id"]),
            Some("R-42".to_string())
        );
        assert_eq!(pick_str(&item, &["absent", "id"]), Some("fallback".to_string()));
        assert_eq!(pick_str(&item, &["absent"]), None);
    }

    #[test]
    fn test_pick_str_skips_empty_and_accepts_numbers() {
        let item = json!({"id": "", "reservation_id": 1042});
        assert_eq!(
            pick_str(&item, &["id", "reservation_id"]),
            Some("1042".to_string())
        );
    }

    #[test]
    fn test_pick_str_dotted_path() {
        let item = json!({"TotalAmount": {"Value": 450.0, "Currency": "EUR"}});
        assert_eq!(
            pick_str(&item, &["TotalAmount.Currency", "currency"]),
            Some("EUR".to_string())
        );
        assert_eq!(pick_f64(&item, &["TotalAmount.Value"]), Some(450.0));
    }

    #[test]
    fn test_pick_f64_parses_numeric_strings() {
        let item = json!({"rate": "150.5"});
        assert_eq!(pick_f64(&item, &["rate"]), Some(150.5));
    }

    #[test]
    fn test_pick_bool_ignores_non_bool() {
        let item = json!({"vip_status": "yes", "vipStatus": true});
        assert_eq!(pick_bool(&item, &["vip_status", "vipStatus"]), Some(true));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let item = json!({"floor": null, "Floor": 5});
        assert_eq!(pick_i64(&item, &["floor", "Floor"]), Some(5));
    }
}
