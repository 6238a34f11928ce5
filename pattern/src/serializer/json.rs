//! JSON serializer for a [`SockPattern`].
//!
//! The document carries the gauge, the ease-adjusted foot, the stitch
//! statistics and one object per present section, in knitting order.

use serde_json::{json, Value};

use crate::section::PatternSection;
use crate::sock::{Slot, SockPattern};

/// Serializes `pattern` to a JSON `Value`.
///
/// Sections carry whatever instructions they currently hold; call
/// [`SockPattern::render`] first to include directions.
#[must_use]
pub fn to_json(pattern: &SockPattern) -> Value {
    let sections: Vec<Value> = pattern
        .sections()
        .iter()
        .map(|(slot, section)| section_json(slot, section))
        .collect();
    json!({
        "description": pattern.to_string(),
        "gauge": pattern.gauge(),
        "foot": pattern.foot(),
        "stitches": pattern.stitches(),
        "sections": sections
    })
}

fn section_json(slot: Slot, section: &PatternSection) -> Value {
    json!({
        "slot": slot,
        "label": section.label(),
        "kind": section.kind(),
        "start_stitches": section.start_stitches(),
        "end_stitches": section.end_stitches(),
        "n_rows": section.n_rows(),
        "increase_rate": section.increase_rate(),
        "held_stitches": section.held_stitches(),
        "instructions": section.instructions()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::{Ease, FootMeasurement, Gauge, PerLength, Units};

    fn pattern() -> SockPattern {
        let gauge =
            Gauge::new(PerLength::new(30.0, 4.0), PerLength::new(30.0, 4.0), Units::Inches)
                .unwrap();
        let foot = FootMeasurement::new(8.2, 9.5, Units::Inches, Ease::Raw).unwrap();
        SockPattern::new(gauge, foot).unwrap()
    }

    #[test]
    fn sections_in_knitting_order() {
        let doc = to_json(&pattern());
        let slots: Vec<&str> = doc["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["slot"].as_str().unwrap())
            .collect();
        assert_eq!(slots, vec!["toe", "instep", "gusset", "heel", "cuff"]);
        assert_eq!(doc["sections"][3]["kind"], "heel_turn");
        assert_eq!(doc["gauge"]["units"], "in");
        assert_eq!(doc["foot"]["ease"], "applied");
    }

    #[test]
    fn instructions_follow_render() {
        let mut p = pattern();
        assert!(to_json(&p)["sections"][0]["instructions"]
            .as_array()
            .unwrap()
            .is_empty());
        p.render();
        let doc = to_json(&p);
        assert_eq!(doc["sections"][0]["increase_rate"]["delta"], 4.0);
        assert!(!doc["sections"][0]["instructions"]
            .as_array()
            .unwrap()
            .is_empty());
    }
}
