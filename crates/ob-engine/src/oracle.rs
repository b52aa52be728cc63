//! The consultation pipeline.
//!
//! `Oracle` owns the loaded data and turns (session, question) into a
//! reading and the next session state. It does no I/O: the caller stores
//! the state and the result.

use ob_core::DataSet;

use crate::config::{EngineConfig, MAX_ATTEMPTS};
use crate::draw::{Draw, draw_three};
use crate::error::{EngineError, EngineResult};
use crate::nlg::assemble::{Assembler, Drift, coda, liturgy, seal};
use crate::nlg::discourse::select_relation;
use crate::nlg::lint::lint;
use crate::nlg::microplan::plan_content;
use crate::reading::{CorrespondenceRow, CorrespondenceTable, ReadingResult};
use crate::rng::SeededRng;
use crate::seed::{derive_seed, normalize_question};
use crate::state::SessionState;
use crate::taboo::{TabooVerdict, check_taboos};
use crate::topic::TopicExtractor;

/// Outcome of one accepted consultation.
#[derive(Debug, Clone)]
pub struct Consultation {
    /// Session state after the consultation.
    pub state: SessionState,
    /// Main seed of the consultation.
    pub seed: u64,
    /// The reading.
    pub reading: ReadingResult,
}

/// Deterministic reading engine over one data set.
#[derive(Debug, Clone)]
pub struct Oracle {
    data: DataSet,
    config: EngineConfig,
    topics: TopicExtractor,
}

impl Oracle {
    /// An oracle with thresholds taken from the lore.
    pub fn new(data: DataSet) -> Self {
        let config = EngineConfig::from_lore(&data.lore);
        Self::with_config(data, config)
    }

    /// An oracle with an explicit configuration.
    pub fn with_config(data: DataSet, config: EngineConfig) -> Self {
        let topics = TopicExtractor::new(&data.deck);
        Self {
            data,
            config,
            topics,
        }
    }

    /// The loaded data.
    pub fn data(&self) -> &DataSet {
        &self.data
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the taboo pre-filter for a question.
    pub fn check_taboos(&self, state: &SessionState, question: &str) -> Option<TabooVerdict<'_>> {
        check_taboos(&self.data.lore, state, question)
    }

    /// Consult the oracle.
    ///
    /// Applies the repeat and certainty penalties, draws with the main seed
    /// (a repeated question forces the previous past symbol), records the
    /// question and the draw, and interprets. The input state is not
    /// modified; the next state is returned.
    pub fn consult(&self, state: &SessionState, question: &str) -> EngineResult<Consultation> {
        if normalize_question(question).is_empty() {
            return Err(EngineError::EmptyQuestion);
        }
        if state.seed_base.is_empty() {
            return Err(EngineError::MissingSeedBase);
        }

        let mut next = state.clone();
        if next.is_repeat_question(question) {
            next.apply_repeat_penalty();
            tracing::debug!(entropy = next.entropy, debt = next.debt, "repeated question");
        }
        if self.config.demands_certainty(question) {
            next.apply_certainty_penalty();
            tracing::debug!(debt = next.debt, "certainty demanded");
        }

        next.consult_count += 1;
        let seed = derive_seed(&next.seed_base, question, next.consult_count, None)?;
        let mut rng = SeededRng::new(seed);
        tracing::debug!(seed, counter = next.consult_count, "derived seed");

        let draw = draw_three(&self.data.deck, &next, &mut rng, question);

        next.record_question(question, self.config.history_len);
        next.last_draw = draw.ids().iter().map(|id| id.to_string()).collect();
        let domains: Vec<&str> = draw
            .symbols()
            .into_iter()
            .flat_map(|s| s.domains.iter().map(String::as_str))
            .collect();
        next.update_memory(draw.ids(), domains);

        let reading = self.interpret(&next, &draw, question, &mut rng)?;
        next.last_reading_fingerprint = reading.fingerprint()?;

        tracing::info!(
            seed,
            symbols = ?reading.symbol_ids(),
            relation = %reading.relation,
            attempt = reading.attempt,
            "consultation accepted"
        );

        Ok(Consultation {
            state: next,
            seed,
            reading,
        })
    }

    /// Interpret a draw for a session that already recorded it.
    ///
    /// The main generator picks the interference marker and the relation.
    /// Each assembly attempt gets its own sub-seed; the first attempt that
    /// passes the linter wins, otherwise the last one is kept.
    fn interpret(
        &self,
        state: &SessionState,
        draw: &Draw<'_>,
        question: &str,
        rng: &mut SeededRng,
    ) -> EngineResult<ReadingResult> {
        let lore = &self.data.lore;
        let drift = Drift::assess(
            state,
            &self.config,
            &lore.effects.interference_markers,
            draw,
            rng,
        );
        let relation = select_relation(draw, rng);
        let topic = self.topics.primary(question);
        let assembler = Assembler::new(&self.data.templates);
        let content = plan_content(draw);

        let attempts = self.config.max_attempts.clamp(1, MAX_ATTEMPTS);
        let mut attempt = 0;
        let (body, act, cost, report) = loop {
            let sub_seed = derive_seed(
                &state.seed_base,
                question,
                state.consult_count,
                Some(attempt),
            )?;
            let mut attempt_rng = SeededRng::new(sub_seed);
            let body = assembler.reading(&content, relation, &drift, &mut attempt_rng);
            let act = assembler.act(&content[1], &topic, &mut attempt_rng);
            let cost = assembler.cost(draw.future, &mut attempt_rng);
            let report = lint(&body.text, &act, &cost);
            let passed = report.passed();
            tracing::debug!(attempt, passed, violations = ?report.violations(), "lint");
            if passed || attempt + 1 >= attempts {
                break (body, act, cost, report);
            }
            attempt += 1;
        };
        if !report.passed() {
            tracing::warn!(
                attempt,
                violations = ?report.violations(),
                "retry bound reached, keeping last attempt"
            );
        }

        Ok(ReadingResult {
            seal: seal(lore, &drift),
            liturgy: liturgy(lore, &drift),
            reading: body.text,
            coda: coda(&act, &cost, &drift),
            act,
            cost,
            correspondences: CorrespondenceTable {
                past: CorrespondenceRow::from(draw.past),
                present: CorrespondenceRow::from(draw.present),
                trend: CorrespondenceRow::from(draw.future),
            },
            interference_line: body.interference_line,
            relation,
            topic,
            attempt,
            checks: report,
            selected_evidence: body.evidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{fixture_deck, fixture_lore, fixture_templates};
    use ob_core::TemplateBank;

    fn oracle() -> Oracle {
        Oracle::new(DataSet {
            deck: fixture_deck(),
            templates: fixture_templates(),
            lore: fixture_lore(),
        })
    }

    #[test]
    fn same_inputs_same_reading() {
        let oracle = oracle();
        let state = SessionState::with_seed_base("S1");
        let a = oracle.consult(&state, "Devo mudar de emprego?").unwrap();
        let b = oracle.consult(&state, "Devo mudar de emprego?").unwrap();
        assert_eq!(a.seed, 167_335_458_472_588_907);
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.reading, b.reading);
        assert_eq!(a.state, b.state);
    }

    #[test]
    fn consult_advances_state() {
        let oracle = oracle();
        let state = SessionState::with_seed_base("S1");
        let out = oracle.consult(&state, "Devo mudar de emprego?").unwrap();
        assert_eq!(state.consult_count, 0);
        assert_eq!(out.state.consult_count, 1);
        assert_eq!(out.state.recent_questions.len(), 1);
        assert_eq!(out.state.last_draw.len(), 3);
        assert_eq!(out.state.motif_counts.values().sum::<u32>(), 3);
        assert_eq!(out.state.last_reading_fingerprint.len(), 16);
        assert_eq!(out.state.entropy, 0);
        assert_eq!(out.state.debt, 0);
        let ids = out.reading.symbol_ids();
        assert_eq!(out.state.last_draw, ids);
    }

    #[test]
    fn repeated_question_penalizes_and_forces_echo() {
        let oracle = oracle();
        let state = SessionState::with_seed_base("S1");
        let first = oracle.consult(&state, "Devo mudar de emprego?").unwrap();
        let past = first.state.last_draw[0].clone();
        let second = oracle
            .consult(&first.state, "devo  mudar de EMPREGO?")
            .unwrap();
        assert_eq!(second.state.entropy, 15);
        assert_eq!(second.state.debt, 10);
        assert_eq!(second.reading.correspondences.past.id, past);
        assert_ne!(first.seed, second.seed);
    }

    #[test]
    fn certainty_adds_debt() {
        let oracle = oracle();
        let state = SessionState::with_seed_base("S1");
        let out = oracle.consult(&state, "Tenho certeza que devo ir?").unwrap();
        assert_eq!(out.state.debt, 20);
        assert_eq!(out.state.entropy, 0);
    }

    #[test]
    fn attempt_is_bounded() {
        let oracle = oracle();
        let mut state = SessionState::with_seed_base("bound");
        for i in 0..20 {
            let out = oracle.consult(&state, &format!("pergunta {i}")).unwrap();
            assert!(out.reading.attempt <= 2);
            state = out.state;
        }
    }

    #[test]
    fn unlintable_bank_keeps_last_attempt() {
        let data = DataSet {
            deck: fixture_deck(),
            templates: TemplateBank::new().with_flat("preco_templates", &["Pague o que deve."]),
            lore: fixture_lore(),
        };
        let oracle = Oracle::new(data);
        let state = SessionState::with_seed_base("S1");
        let out = oracle.consult(&state, "Qual o caminho?").unwrap();
        assert!(!out.reading.checks.passed());
        assert_eq!(out.reading.attempt, 2);
        assert_eq!(out.reading.cost, "Pague o que deve.");
        assert!(out.reading.coda.contains("PREÇO: Pague o que deve."));
    }

    #[test]
    fn single_attempt_config() {
        let data = DataSet {
            deck: fixture_deck(),
            templates: TemplateBank::new().with_flat("ato_templates", &["Faça algo."]),
            lore: fixture_lore(),
        };
        let oracle = Oracle::with_config(data, EngineConfig::default().with_max_attempts(1));
        let out = oracle
            .consult(&SessionState::with_seed_base("S1"), "Qual o caminho?")
            .unwrap();
        assert_eq!(out.reading.attempt, 0);
    }

    #[test]
    fn empty_question_is_rejected() {
        let oracle = oracle();
        let state = SessionState::with_seed_base("S1");
        assert!(matches!(
            oracle.consult(&state, "   "),
            Err(EngineError::EmptyQuestion)
        ));
    }

    #[test]
    fn missing_base_is_rejected() {
        let oracle = oracle();
        let state = SessionState::with_seed_base("");
        assert!(matches!(
            oracle.consult(&state, "q"),
            Err(EngineError::MissingSeedBase)
        ));
    }

    #[test]
    fn high_entropy_shows_interference() {
        let oracle = oracle();
        let mut state = SessionState::with_seed_base("S1");
        state.entropy = 90;
        let out = oracle.consult(&state, "O que vem?").unwrap();
        assert!(out.reading.interference_line.is_some());
        assert!(out.reading.seal.contains("░ OBSERVADOR"));
        assert!(out.reading.liturgy.contains("Ruído: 90%"));
    }

    #[test]
    fn high_debt_flavors_coda() {
        let oracle = oracle();
        let mut state = SessionState::with_seed_base("S1");
        state.debt = 70;
        let out = oracle.consult(&state, "O que vem?").unwrap();
        assert!(out.reading.seal.ends_with("O preço aumenta."));
        assert!(out.reading.coda.ends_with("(Dívida acumulada: 70%)"));
        assert!(out.reading.coda.contains(&out.reading.act));
    }

    #[test]
    fn taboo_check_through_oracle() {
        let oracle = oracle();
        let state = SessionState::with_seed_base("S1");
        let verdict = oracle.check_taboos(&state, "números da loteria").unwrap();
        assert_eq!(verdict.state.debt, 15);
        assert!(oracle.check_taboos(&state, "Devo mudar?").is_none());
    }

    #[test]
    fn fingerprint_tracks_reading() {
        let oracle = oracle();
        let state = SessionState::with_seed_base("S1");
        let out = oracle.consult(&state, "Devo mudar de emprego?").unwrap();
        assert_eq!(
            out.state.last_reading_fingerprint,
            out.reading.fingerprint().unwrap()
        );
        let other = oracle.consult(&state, "Outra pergunta").unwrap();
        assert_ne!(
            out.state.last_reading_fingerprint,
            other.state.last_reading_fingerprint
        );
    }
}
