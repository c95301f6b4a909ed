//! Rule-based comfort tips for a described set of symptoms.

const PAIN_RELIEF: &str = "Consider ibuprofen (if safe for you) and a heating pad. Hydrate well.";
const SEVERE_PAIN: &str =
    "If pain is persistent and severe, consult a healthcare professional.";
const HEAVY_FLOW: &str =
    "Heavy flow noted: monitor for dizziness or fatigue; seek advice if concerned.";
const CRAMPS: &str = "Gentle stretching and light movement can ease cramps.";
const NAUSEA: &str = "Ginger tea and small meals may help with nausea.";
const COMFORT: &str =
    "Rest, warm compress, hydration, and balanced meals can help overall comfort.";

/// Tips for a pain level (0-4), flow level (0-4) and free-text description.
/// Never empty: with nothing to react to, a general comfort tip is returned.
pub fn pain_advice(pain: u8, blood: u8, text: &str) -> Vec<&'static str> {
    let text = text.to_lowercase();
    let mut tips = Vec::new();

    if pain >= 3 {
        tips.push(PAIN_RELIEF);
    }
    if pain == 4 {
        tips.push(SEVERE_PAIN);
    }
    if blood >= 3 {
        tips.push(HEAVY_FLOW);
    }
    if text.contains("cramp") {
        tips.push(CRAMPS);
    }
    if text.contains("nausea") {
        tips.push(NAUSEA);
    }
    if tips.is_empty() {
        tips.push(COMFORT);
    }
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_comfort() {
        assert_eq!(pain_advice(0, 0, ""), vec![COMFORT]);
        assert_eq!(pain_advice(2, 2, "tired"), vec![COMFORT]);
    }

    #[test]
    fn unbearable_pain_adds_professional_tip() {
        assert_eq!(pain_advice(3, 0, ""), vec![PAIN_RELIEF]);
        assert_eq!(pain_advice(4, 0, ""), vec![PAIN_RELIEF, SEVERE_PAIN]);
    }

    #[test]
    fn heavy_flow_warns() {
        assert_eq!(pain_advice(0, 3, ""), vec![HEAVY_FLOW]);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            pain_advice(0, 0, "Bad CRAMPS and some Nausea"),
            vec![CRAMPS, NAUSEA]
        );
    }

    #[test]
    fn rules_stack_in_order() {
        assert_eq!(
            pain_advice(4, 4, "cramp"),
            vec![PAIN_RELIEF, SEVERE_PAIN, HEAVY_FLOW, CRAMPS]
        );
    }
}
