use crate::core::validate::FieldErrors;
use crate::models::{AnalyzeSurveyRequest, SocietalSurvey, SurveyAnalysis};
use std::collections::BTreeMap;

/// Likert scale bounds for a single answer
const MIN_ANSWER: i64 = 1;
const MAX_ANSWER: i64 = 5;

/// Validate a survey submission and narrow it into a typed record.
///
/// Every answer must be a Likert value in [1, 5] and at least one answer
/// must be present. Failing fields are reported as
/// `responses.<section>.<question>`.
pub fn validate_survey(req: &AnalyzeSurveyRequest) -> Result<SocietalSurvey, FieldErrors> {
    let mut errors = FieldErrors::new();

    let mut answered = 0usize;
    for (section, answers) in &req.responses {
        for (question, value) in answers {
            answered += 1;
            if !(MIN_ANSWER..=MAX_ANSWER).contains(value) {
                errors.insert(
                    format!("responses.{}.{}", section, question),
                    format!("must be between {} and {}", MIN_ANSWER, MAX_ANSWER),
                );
            }
        }
    }

    if answered == 0 {
        errors.insert(
            "responses".to_string(),
            "at least one answered question is required".to_string(),
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SocietalSurvey {
        survey_id: req.survey_id.clone(),
        source: req.source.clone(),
        responses: req.responses.clone(),
    })
}

/// Compute the influence analysis for a validated survey.
///
/// Per-section score is the mean answer normalized to [0, 1]; the overall
/// influence is the mean of the section scores. Deterministic and pure.
pub fn analyze_survey(survey: &SocietalSurvey) -> SurveyAnalysis {
    let mut section_scores = BTreeMap::new();

    for (section, answers) in &survey.responses {
        if answers.is_empty() {
            continue;
        }
        let sum: i64 = answers.values().sum();
        let mean = sum as f64 / answers.len() as f64;
        section_scores.insert(section.clone(), normalize_answer(mean));
    }

    let overall_influence = if section_scores.is_empty() {
        0.0
    } else {
        section_scores.values().sum::<f64>() / section_scores.len() as f64
    };

    // First section in key order wins ties, so only a strictly greater
    // score may displace the current best
    let mut dominant: Option<(&String, f64)> = None;
    for (section, score) in &section_scores {
        match dominant {
            Some((_, best)) if *score <= best => {}
            _ => dominant = Some((section, *score)),
        }
    }
    let dominant_section = dominant
        .map(|(section, _)| section.clone())
        .unwrap_or_default();

    SurveyAnalysis {
        section_scores,
        overall_influence,
        dominant_section,
    }
}

/// Map a mean Likert answer in [1, 5] onto [0, 1]
#[inline]
fn normalize_answer(mean: f64) -> f64 {
    ((mean - MIN_ANSWER as f64) / (MAX_ANSWER - MIN_ANSWER) as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(sections: &[(&str, &[i64])]) -> AnalyzeSurveyRequest {
        let mut responses = BTreeMap::new();
        for (section, answers) in sections {
            let answers: BTreeMap<String, i64> = answers
                .iter()
                .enumerate()
                .map(|(idx, v)| (idx.to_string(), *v))
                .collect();
            responses.insert(section.to_string(), answers);
        }
        AnalyzeSurveyRequest {
            survey_id: Some("survey-1".to_string()),
            source: Some("web-ui".to_string()),
            responses,
            meta: None,
            timestamp: None,
        }
    }

    #[test]
    fn test_valid_survey_passes() {
        let req = request(&[("A", &[1, 3, 5]), ("B", &[2, 4])]);
        let survey = validate_survey(&req).unwrap();
        assert_eq!(survey.responses.len(), 2);
    }

    #[test]
    fn test_out_of_scale_answer_named() {
        let req = request(&[("A", &[1, 6]), ("B", &[0])]);
        let errors = validate_survey(&req).unwrap_err();
        assert!(errors.contains_key("responses.A.1"));
        assert!(errors.contains_key("responses.B.0"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_empty_survey_rejected() {
        let req = request(&[]);
        let errors = validate_survey(&req).unwrap_err();
        assert!(errors.contains_key("responses"));
    }

    #[test]
    fn test_uniform_neutral_scores_half() {
        let req = request(&[("A", &[3, 3, 3]), ("B", &[3, 3])]);
        let analysis = analyze_survey(&validate_survey(&req).unwrap());

        assert!((analysis.section_scores["A"] - 0.5).abs() < 1e-9);
        assert!((analysis.section_scores["B"] - 0.5).abs() < 1e-9);
        assert!((analysis.overall_influence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_score_extremes() {
        let req = request(&[("A", &[1, 1]), ("B", &[5, 5])]);
        let analysis = analyze_survey(&validate_survey(&req).unwrap());

        assert_eq!(analysis.section_scores["A"], 0.0);
        assert_eq!(analysis.section_scores["B"], 1.0);
        assert_eq!(analysis.dominant_section, "B");
    }

    #[test]
    fn test_dominant_tie_breaks_on_key_order() {
        let req = request(&[("B", &[4]), ("A", &[4])]);
        let analysis = analyze_survey(&validate_survey(&req).unwrap());
        assert_eq!(analysis.dominant_section, "A");
    }
}
