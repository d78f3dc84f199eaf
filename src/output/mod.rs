// Output formatting — the plain topic report and colored terminal display.

pub mod terminal;

use crate::corpus::vocabulary::Vocabulary;
use crate::model::TopicModel;

/// Render a trained model's topics as ranked term lists:
/// a 1-indexed `Topic <n>:` label per topic, followed by indented
/// `term: weight` lines in descending weight order.
///
/// Pure formatting — the model is never mutated.
pub fn render_topics(
    model: &TopicModel,
    vocabulary: &Vocabulary,
    num_topics: usize,
    num_words: usize,
) -> String {
    let mut out = String::new();
    for topic in 0..num_topics.min(model.num_topics()) {
        out.push_str(&format!("Topic {}:\n", topic + 1));
        for (id, weight) in model.top_terms(topic, num_words) {
            let term = vocabulary.token(id).unwrap_or("?");
            out.push_str(&format!("\t{term}: {weight:.4}\n"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::vocabulary::VocabularyParams;
    use crate::corpus::Document;
    use crate::model::{TopicModel, TrainingParams};

    #[test]
    fn report_orders_topics_and_terms() {
        // Vocabulary ids in first-seen order: x=0, y=1, p=2, q=3.
        let docs: Vec<Document> = vec![vec![
            "x".to_string(),
            "y".to_string(),
            "p".to_string(),
            "q".to_string(),
        ]];
        let vocab = Vocabulary::build(
            &docs,
            &VocabularyParams {
                no_below: 1,
                no_above: 1.0,
            },
        )
        .unwrap();

        let model = TopicModel::new(
            vec![
                vec![0.5, 0.3, 0.1, 0.1], // topic 1: x then y
                vec![0.2, 0.2, 0.4, 0.2], // topic 2: p first
            ],
            vec![],
            TrainingParams::search_phase(2, 42),
        );

        let report = render_topics(&model, &vocab, 2, 2);

        let topic1 = report.find("Topic 1:").unwrap();
        let topic2 = report.find("Topic 2:").unwrap();
        assert!(topic1 < topic2);

        let x = report.find("\tx: 0.5000").unwrap();
        let y = report.find("\ty: 0.3000").unwrap();
        assert!(topic1 < x && x < y && y < topic2);
        // num_words=2 truncates the rest of topic 1.
        assert!(!report[topic1..topic2].contains("p:"));
    }

    #[test]
    fn report_caps_at_model_topic_count() {
        let docs: Vec<Document> = vec![vec!["a".to_string()]];
        let vocab = Vocabulary::build(
            &docs,
            &VocabularyParams {
                no_below: 1,
                no_above: 1.0,
            },
        )
        .unwrap();
        let model = TopicModel::new(vec![vec![1.0]], vec![], TrainingParams::search_phase(1, 42));
        let report = render_topics(&model, &vocab, 30, 10);
        assert!(report.contains("Topic 1:"));
        assert!(!report.contains("Topic 2:"));
    }
}
