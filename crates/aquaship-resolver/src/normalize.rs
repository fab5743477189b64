//! Response normalization for the external postal-code sources.
//!
//! Each source returns its own JSON shape with inconsistently cased field
//! names (`state`/`State`/`statename`, `District`/`districtname`/`taluk`).
//! Extraction here reduces both shapes to a [`RawPlace`]; the resolver then
//! derives region, cost, time, and serviceability from it.

use chrono::Utc;
use serde_json::Value;

use aquaship_core::region::{derive_region, derive_shipping_cost, region_delivery_time};
use aquaship_core::types::PostalRecord;
use aquaship_core::SourceKind;

use crate::record::RemoteRecord;

/// The fields an external source actually supplies. `state` is mandatory:
/// an extraction that yields an empty state is a miss even when the HTTP
/// call succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawPlace {
    pub state: String,
    pub city: String,
    pub district: String,
}

/// First non-empty string among `keys` in `obj`.
fn pick_str(obj: &Value, keys: &[&str]) -> String {
    for key in keys {
        if let Some(s) = obj.get(*key).and_then(Value::as_str) {
            let s = s.trim();
            if !s.is_empty() {
                return s.to_string();
            }
        }
    }
    String::new()
}

/// Extracts a place from the generic postal-lookup payload: a one-element
/// array carrying a `Status` marker and a `PostOffice` array.
pub(crate) fn postal_lookup_place(payload: &Value) -> Option<RawPlace> {
    let envelope = payload.as_array()?.first()?;
    let status = pick_str(envelope, &["Status", "status"]);
    if !status.eq_ignore_ascii_case("success") {
        return None;
    }
    let office = envelope
        .get("PostOffice")
        .or_else(|| envelope.get("postOffice"))
        .and_then(Value::as_array)?
        .first()?;
    finish_place(office)
}

/// Extracts a place from the open-data payload: a `records` array with the
/// query filter echoed back. Prefers the record whose pincode matches, in
/// case the upstream filter was ignored.
pub(crate) fn open_data_place(payload: &Value, code: &str) -> Option<RawPlace> {
    let records = payload.get("records").and_then(Value::as_array)?;
    let record = records
        .iter()
        .find(|r| pick_str(r, &["pincode", "Pincode"]) == code)
        .or_else(|| records.first())?;
    finish_place(record)
}

fn finish_place(obj: &Value) -> Option<RawPlace> {
    let state = pick_str(obj, &["State", "state", "statename", "Statename"]);
    if state.is_empty() {
        return None;
    }
    Some(RawPlace {
        state,
        city: pick_str(
            obj,
            &["Name", "name", "officename", "Taluk", "taluk", "Block", "city", "City"],
        ),
        district: pick_str(obj, &["District", "district", "districtname"]),
    })
}

/// Completes a [`RawPlace`] into a [`RemoteRecord`], deriving the fields
/// the source did not supply. The denylist forces `serviceable = false`
/// with zero cost regardless of region.
pub(crate) fn derive_record(
    code: &str,
    place: RawPlace,
    source: SourceKind,
    denylist: &[String],
) -> RemoteRecord {
    let region = derive_region(&place.state);
    let denied = denylist.iter().any(|c| c == code);
    let (shipping_cost, delivery_time, serviceable) = if denied {
        (0.0, "Not available".to_string(), false)
    } else {
        (
            derive_shipping_cost(&place.state),
            region_delivery_time(region).to_string(),
            true,
        )
    };
    RemoteRecord {
        record: PostalRecord {
            code: code.to_string(),
            state: place.state,
            city: place.city,
            district: place.district,
            region,
            delivery_time,
            shipping_cost,
            serviceable,
        },
        source,
        fetched_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquaship_core::types::Region;
    use serde_json::json;

    #[test]
    fn postal_lookup_extracts_first_post_office() {
        let payload = json!([{
            "Message": "Number of pincode(s) found:1",
            "Status": "Success",
            "PostOffice": [{
                "Name": "New Delhi G.P.O.",
                "District": "Central Delhi",
                "State": "Delhi",
                "Pincode": "110001"
            }]
        }]);
        let place = postal_lookup_place(&payload).expect("should extract a place");
        assert_eq!(place.state, "Delhi");
        assert_eq!(place.city, "New Delhi G.P.O.");
        assert_eq!(place.district, "Central Delhi");
    }

    #[test]
    fn postal_lookup_error_status_is_a_miss() {
        let payload = json!([{
            "Message": "No records found",
            "Status": "Error",
            "PostOffice": null
        }]);
        assert!(postal_lookup_place(&payload).is_none());
    }

    #[test]
    fn postal_lookup_empty_post_office_is_a_miss() {
        let payload = json!([{ "Status": "Success", "PostOffice": [] }]);
        assert!(postal_lookup_place(&payload).is_none());
    }

    #[test]
    fn open_data_extracts_matching_record() {
        let payload = json!({
            "filters": { "pincode": "600001" },
            "count": 2,
            "records": [
                { "pincode": "600002", "statename": "TAMIL NADU", "officename": "Anna Road", "districtname": "Chennai" },
                { "pincode": "600001", "statename": "TAMIL NADU", "officename": "Chennai G.P.O.", "districtname": "Chennai" }
            ]
        });
        let place = open_data_place(&payload, "600001").expect("should extract a place");
        assert_eq!(place.city, "Chennai G.P.O.");
        assert_eq!(place.district, "Chennai");
    }

    #[test]
    fn open_data_falls_back_to_first_record() {
        let payload = json!({
            "records": [
                { "pincode": "700001", "statename": "WEST BENGAL", "officename": "Kolkata G.P.O.", "districtname": "Kolkata" }
            ]
        });
        let place = open_data_place(&payload, "700099").expect("should fall back");
        assert_eq!(place.state, "WEST BENGAL");
    }

    #[test]
    fn open_data_empty_records_is_a_miss() {
        assert!(open_data_place(&json!({ "records": [] }), "110001").is_none());
        assert!(open_data_place(&json!({}), "110001").is_none());
    }

    #[test]
    fn empty_state_is_a_miss_even_on_success() {
        let payload = json!([{
            "Status": "Success",
            "PostOffice": [{ "Name": "Somewhere", "State": "  " }]
        }]);
        assert!(postal_lookup_place(&payload).is_none());
    }

    #[test]
    fn tolerates_lowercase_field_variants() {
        let payload = json!({
            "records": [{ "pincode": "560001", "state": "Karnataka", "taluk": "Bengaluru", "district": "Bengaluru Urban" }]
        });
        let place = open_data_place(&payload, "560001").expect("lowercase keys should extract");
        assert_eq!(place.state, "Karnataka");
        assert_eq!(place.city, "Bengaluru");
        assert_eq!(place.district, "Bengaluru Urban");
    }

    #[test]
    fn derive_record_fills_region_cost_and_time() {
        let place = RawPlace {
            state: "TAMIL NADU".to_string(),
            city: "Chennai G.P.O.".to_string(),
            district: "Chennai".to_string(),
        };
        let record = derive_record("600001", place, SourceKind::OpenData, &[]);
        assert_eq!(record.record.region, Region::South);
        assert_eq!(record.record.shipping_cost, 70.0);
        assert_eq!(record.record.delivery_time, "2-3 days");
        assert!(record.record.serviceable);
        assert_eq!(record.source, SourceKind::OpenData);
    }

    #[test]
    fn denylisted_code_derives_unserviceable() {
        let place = RawPlace {
            state: "Delhi".to_string(),
            city: "New Delhi".to_string(),
            district: "Central Delhi".to_string(),
        };
        let denylist = vec!["110001".to_string()];
        let record = derive_record("110001", place, SourceKind::PostalLookup, &denylist);
        assert!(!record.record.serviceable);
        assert_eq!(record.record.shipping_cost, 0.0);
        assert_eq!(record.record.delivery_time, "Not available");
    }
}
