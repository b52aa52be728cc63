//! Reading assembly.
//!
//! The body is a fixed skeleton of lines (thesis, findings, evidence,
//! warrant, conditional trend, tension, limiter). Each line is rendered from
//! the template bank when it has a matching entry and from a built-in
//! template otherwise. Act and cost come from the same generator stream as
//! the body.

use ob_core::{Lore, Symbol, TemplateBank};

use crate::config::EngineConfig;
use crate::draw::Draw;
use crate::nlg::discourse::DiscourseRelation;
use crate::nlg::microplan::{SentencePlanner, SymbolContent};
use crate::nlg::template::{placeholders, render};
use crate::reading::SelectedEvidence;
use crate::rng::SeededRng;
use crate::state::SessionState;

const THESIS: &str = "Tese: {present_quality} no presente define a direção.";
const FINDING_PAST: &str = "Passado: {past_quality} se acumulou enquanto {past_shadow} crescia.";
const FINDING_PRESENT: &str =
    "Presente: você {present_verbo} com {present_quality}, mas {present_shadow} ameaça.";
const EVIDENCE: &str = "Evidência: {sinal_observavel}";
const EVIDENCE_FUTURE: &str = "Evidência prevista: {sinal_observavel}";
const ECHO: &str = "Evidência: o eco de {echo_symbol} volta a aparecer.";
const WARRANT: &str = "Regra: {connector}, {present_quality} continua {past_quality}.";
const QUALIFIERS: &[&str] = &["provável", "possível"];
const TREND: &str = "Se você mantiver {present_quality}, então a tendência é {future_quality}, mas {future_shadow} cresce.";
const TENSION: &str = "Tensão: {present_quality} versus {future_shadow}.";
const LIMIT: &str = "Limite: não confunda tendência com certeza.";
const ACT_WITH_ACTION: &str = "Em {prazo}, {acao} sobre {tema}.";
const ACT_GENERIC: &str = "Hoje, faça uma ação pequena de {verbo} sobre {tema}: {passo}.";
const GENERIC_ACT_SLOTS: &[&str] = &["verbo", "tema", "passo"];
const STEPS: &[&str] = &["anote 3 evidências"];
const COST: &str = "Por {prazo}, renuncie a {renuncia}, para que {sombra} não governe.";
const TIME_REFERENCES: &[&str] = &["48h", "24h", "3 dias"];
const RENUNCIATIONS: &[&str] = &["perguntar de novo por 48h"];
const INTERFERENCE_FRAGMENTS: &[&str] = &["░", "▒", "▓"];

const SIGNAL_PAST: &str = "padrões que se repetem no mesmo ponto";
const SIGNAL_PRESENT: &str = "sinais observáveis no presente";
const SIGNAL_FUTURE: &str = "sinais prováveis no futuro";

/// Drift effects in force for one reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    /// Entropy at interpretation time.
    pub entropy: u32,
    /// Debt at interpretation time.
    pub debt: u32,
    /// Entropy is above the interference threshold.
    pub entropy_high: bool,
    /// Debt is above the debt threshold.
    pub debt_high: bool,
    /// Interference marker, empty unless entropy is high.
    pub marker: String,
    /// The session echo, if any.
    pub echo: Option<String>,
    /// Whether the echo is part of this draw.
    pub echo_in_draw: bool,
}

impl Drift {
    /// Read drift off the session. Draws the interference marker from
    /// `rng` only when entropy is high.
    pub fn assess(
        state: &SessionState,
        config: &EngineConfig,
        markers: &[String],
        draw: &Draw<'_>,
        rng: &mut SeededRng,
    ) -> Self {
        let entropy_high = state.entropy > config.interference_threshold;
        let debt_high = state.debt > config.debt_threshold;
        let marker = if entropy_high {
            rng.choose(markers)
                .cloned()
                .unwrap_or_else(|| INTERFERENCE_FRAGMENTS[0].to_string())
        } else {
            String::new()
        };
        let echo = state.echo_symbol().map(str::to_string);
        let echo_in_draw = echo.as_deref().is_some_and(|id| draw.contains(id));
        Self {
            entropy: state.entropy,
            debt: state.debt,
            entropy_high,
            debt_high,
            marker,
            echo,
            echo_in_draw,
        }
    }
}

/// An assembled body before act and cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingBody {
    /// The `[LEITURA]` block.
    pub text: String,
    /// Noise line when entropy is high.
    pub interference_line: Option<String>,
    /// Evidence phrases chosen per position.
    pub evidence: SelectedEvidence,
}

/// Renders readings, acts, and costs from a template bank.
#[derive(Debug, Clone, Copy)]
pub struct Assembler<'t> {
    templates: &'t TemplateBank,
}

fn pick(rng: &mut SeededRng, bank: &[String], fallback: &[&str]) -> String {
    match rng.choose(bank) {
        Some(t) => t.clone(),
        None => rng
            .choose(fallback)
            .map(|t| t.to_string())
            .unwrap_or_default(),
    }
}

fn pick_signal(rng: &mut SeededRng, signals: &[String], fallback: &str) -> String {
    rng.choose(signals)
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

struct Slots<'c, 'a> {
    content: &'c [SymbolContent<'a>; 3],
    domain: &'c str,
}

impl Slots<'_, '_> {
    fn position(name: &str) -> Option<(usize, &str)> {
        const PREFIXES: &[(&str, usize)] = &[
            ("past_", 0),
            ("passado_", 0),
            ("present_", 1),
            ("presente_", 1),
            ("future_", 2),
            ("futuro_", 2),
            ("tend_", 2),
        ];
        PREFIXES
            .iter()
            .find_map(|(prefix, pos)| name.strip_prefix(prefix).map(|field| (*pos, field)))
    }

    fn resolve(&self, name: &str, planner: &mut SentencePlanner) -> Option<String> {
        if name == "dominio" {
            return Some(self.domain.to_string());
        }
        let (pos, field) = Self::position(name)?;
        let c = &self.content[pos];
        let value = match field {
            "quality" | "qualidade" | "pilar" => c.quality.clone(),
            "shadow" | "sombra" => c.shadow.clone(),
            "verbo" | "verb" => c.verb.clone(),
            "element" | "elemento" => c.element.clone(),
            "condition" | "condicao" => c.condition.clone(),
            "signal" | "sinal" => c.signal.clone(),
            "name" | "nome" => c.symbol.name.clone(),
            "ref" => planner.reference(c.symbol),
            _ => return None,
        };
        Some(value)
    }

    fn fill(
        &self,
        template: &str,
        planner: &mut SentencePlanner,
        extras: &[(&str, &str)],
    ) -> String {
        render(template, |name| {
            extras
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
                .or_else(|| self.resolve(name, planner))
        })
    }
}

impl<'t> Assembler<'t> {
    /// An assembler over a template bank.
    pub fn new(templates: &'t TemplateBank) -> Self {
        Self { templates }
    }

    fn keyed_or(&self, rng: &mut SeededRng, category: &str, key: &str, fallback: &str) -> String {
        pick(rng, self.templates.keyed(category, key), &[fallback])
    }

    fn flat_or(&self, rng: &mut SeededRng, category: &str, fallback: &[&str]) -> String {
        pick(rng, self.templates.flat(category), fallback)
    }

    /// Assemble the `[LEITURA]` block.
    pub fn reading(
        &self,
        content: &[SymbolContent<'_>; 3],
        relation: DiscourseRelation,
        drift: &Drift,
        rng: &mut SeededRng,
    ) -> ReadingBody {
        let [past, present, future] = content;
        let element = if past.element.is_empty() {
            "fogo"
        } else {
            past.element.as_str()
        };
        let slots = Slots {
            content,
            domain: present.primary_domain(),
        };
        let mut planner = SentencePlanner::new();
        let key = relation.as_str();

        let thesis = self.keyed_or(rng, "thesis_templates", key, THESIS);
        let thesis = slots.fill(&thesis, &mut planner, &[]);

        let finding_past = self.keyed_or(rng, "finding_past_templates", element, FINDING_PAST);
        let finding_past = slots.fill(&finding_past, &mut planner, &[]);

        let signal_past = pick_signal(rng, past.observable_signals, SIGNAL_PAST);
        let evidence_past = self.flat_or(rng, "evidence_past_templates", &[EVIDENCE]);
        let evidence_past = slots.fill(
            &evidence_past,
            &mut planner,
            &[("sinal_observavel", signal_past.as_str())],
        );

        let finding_present =
            self.keyed_or(rng, "finding_present_templates", element, FINDING_PRESENT);
        let finding_present = slots.fill(&finding_present, &mut planner, &[]);

        let signal_present = pick_signal(rng, present.observable_signals, SIGNAL_PRESENT);
        let evidence_present = self.flat_or(rng, "evidence_present_templates", &[EVIDENCE]);
        let evidence_present = slots.fill(
            &evidence_present,
            &mut planner,
            &[("sinal_observavel", signal_present.as_str())],
        );

        let connector = planner.connector(relation, rng);
        let warrant = self.keyed_or(rng, "warrant_by_relation", key, WARRANT);
        let warrant = slots.fill(&warrant, &mut planner, &[("connector", connector)]);

        let qualifier = self.flat_or(rng, "qualifier_templates", QUALIFIERS);
        let trend = self.keyed_or(rng, "trend_sentence_templates", element, TREND);
        let trend = slots.fill(&trend, &mut planner, &[("qualifier", qualifier.as_str())]);
        let trend = format!("Condição ({qualifier}): {trend}");

        let signal_future = pick_signal(rng, future.observable_signals, SIGNAL_FUTURE);
        let echo = drift.echo.as_deref().filter(|_| drift.echo_in_draw);
        let evidence_future = match echo {
            Some(id) => {
                let template = self.flat_or(rng, "eco_templates", &[ECHO]);
                slots.fill(&template, &mut planner, &[("echo_symbol", id)])
            }
            None => {
                let template = self.flat_or(rng, "evidence_future_templates", &[EVIDENCE_FUTURE]);
                slots.fill(
                    &template,
                    &mut planner,
                    &[("sinal_observavel", signal_future.as_str())],
                )
            }
        };

        let tension = self.flat_or(rng, "tension_templates", &[TENSION]);
        let tension = slots.fill(&tension, &mut planner, &[]);

        let limit = match rng.choose(present.exceptions) {
            Some(exception) => format!("Limite: {exception}"),
            None => {
                let template = self.flat_or(rng, "limit_templates", &[LIMIT]);
                slots.fill(&template, &mut planner, &[])
            }
        };

        let lines: [&str; 11] = [
            "[LEITURA]",
            &thesis,
            &finding_past,
            &evidence_past,
            &finding_present,
            &evidence_present,
            &warrant,
            &trend,
            &evidence_future,
            &tension,
            &limit,
        ];
        let text = lines.join("\n");

        let interference_line = drift.entropy_high.then(|| {
            let fragment = self.flat_or(rng, "interference_fragments", INTERFERENCE_FRAGMENTS);
            format!("[INTERFERÊNCIA] {fragment} eco… eco… {fragment}")
        });

        ReadingBody {
            text,
            interference_line,
            evidence: SelectedEvidence {
                past: signal_past,
                present: signal_present,
                future: signal_future,
            },
        }
    }

    /// A time-boxed, verifiable action from the present symbol.
    ///
    /// Uses one of the symbol's minimal interventions when it has any,
    /// otherwise a generic action built from its verb.
    pub fn act(&self, present: &SymbolContent<'_>, topic: &str, rng: &mut SeededRng) -> String {
        let templates = self.templates.flat("ato_templates");

        if let Some(intervention) = rng.choose(present.interventions) {
            let deadline = intervention.deadline_token();
            let hours = intervention.deadline_hours.to_string();
            let with_action: Vec<&String> =
                templates.iter().filter(|t| t.contains("{acao}")).collect();
            let chosen = if templates.first().is_some_and(|t| t.contains("{acao}")) {
                rng.choose(&with_action).map(|t| t.as_str())
            } else {
                None
            };
            let template = chosen.unwrap_or(ACT_WITH_ACTION);
            return render(template, |name| match name {
                "acao" => Some(intervention.action.clone()),
                "tema" => Some(topic.to_string()),
                "prazo_horas" => Some(hours.clone()),
                "prazo" => Some(deadline.clone()),
                _ => None,
            });
        }

        let generic: Vec<String> = templates
            .iter()
            .filter(|t| {
                placeholders(t)
                    .iter()
                    .all(|name| GENERIC_ACT_SLOTS.contains(&name.as_str()))
            })
            .cloned()
            .collect();
        let template = pick(rng, &generic, &[ACT_GENERIC]);
        let verb = present
            .symbol
            .correspondences
            .verb
            .clone()
            .unwrap_or_else(|| "agir".to_string());
        let step = self.flat_or(rng, "passos_observaveis", STEPS);
        render(&template, |name| match name {
            "verbo" => Some(verb.clone()),
            "tema" => Some(topic.to_string()),
            "passo" => Some(step.clone()),
            _ => None,
        })
    }

    /// A time-boxed renunciation tied to the future symbol's shadow.
    pub fn cost(&self, future: &Symbol, rng: &mut SeededRng) -> String {
        let template = self.flat_or(rng, "preco_templates", &[COST]);
        let corr = &future.correspondences;
        let shadow = corr.shadow.clone().unwrap_or_else(|| "algo".to_string());
        let quality = corr.quality.clone().unwrap_or_else(|| "algo".to_string());
        let deadline = self.flat_or(rng, "time_references", TIME_REFERENCES);
        let renunciation = self.flat_or(rng, "renuncias", RENUNCIATIONS);
        let renunciation = renunciation_for_shadow(&shadow, renunciation);
        let forbidden = forbidden_action(&renunciation);

        render(&template, |name| match name {
            "prazo" => Some(deadline.clone()),
            "renuncia" => Some(renunciation.clone()),
            "sombra" => Some(shadow.clone()),
            "qualidade" => Some(quality.clone()),
            "acao_proibida" => Some(forbidden.to_string()),
            _ => None,
        })
    }
}

/// Swap a generic renunciation for one that targets the shadow.
pub fn renunciation_for_shadow(shadow: &str, renunciation: String) -> String {
    let (replacement, keep_if) = match shadow {
        "rigidez" => ("controle excessivo", "controle"),
        "dispersão" => ("multitarefa", "multitarefa"),
        "obsessão" => ("repetir a mesma pergunta", "pergunta"),
        _ => return renunciation,
    };
    if renunciation.contains(keep_if) {
        renunciation
    } else {
        replacement.to_string()
    }
}

fn forbidden_action(renunciation: &str) -> &'static str {
    if renunciation.contains("perguntar") {
        "perguntar de novo"
    } else if renunciation.contains("repetir") {
        "repetir"
    } else {
        "fazer"
    }
}

/// The entity's seal.
pub fn seal(lore: &Lore, drift: &Drift) -> String {
    let name = &lore.entity.name;
    let signature = &lore.entity.signature;
    if drift.entropy_high {
        format!(
            "[SELO]\n{marker} {name} — {tagline} {marker}",
            marker = drift.marker,
            tagline = signature.tagline
        )
    } else if drift.debt_high {
        format!("[SELO]\n{} {name} — O preço aumenta.", signature.glyph())
    } else {
        format!("[SELO]\n{} {name} — {}", signature.glyph(), signature.tagline)
    }
}

/// Applicable laws and the cost of the moment.
pub fn liturgy(lore: &Lore, drift: &Drift) -> String {
    let laws = lore.applicable_laws();
    let (entropy, debt) = (drift.entropy, drift.debt);
    if drift.entropy_high {
        format!(
            "[LITURGIA]\n{} Interferência detectada. Leis: {laws}\nRuído: {entropy}%",
            drift.marker
        )
    } else if drift.debt_high {
        format!("[LITURGIA]\nLeis: {laws}\nDívida acumulada: {debt}%. O Véu endurece.")
    } else if let Some(echo) = drift.echo.as_deref().filter(|_| drift.echo_in_draw) {
        format!(
            "[LITURGIA]\nLeis: {laws} | Eco detectado: {echo}\nCusto: Entropia {entropy}%, Dívida {debt}%"
        )
    } else {
        format!(
            "[LITURGIA]\nLeis aplicáveis: {laws}\nCusto do momento: Entropia {entropy}%, Dívida {debt}%"
        )
    }
}

/// Closing block with the act and the cost.
pub fn coda(act: &str, cost: &str, drift: &Drift) -> String {
    if drift.debt_high {
        format!(
            "[CODA]\nATO: {act}\nPREÇO: {cost} (Dívida acumulada: {}%)",
            drift.debt
        )
    } else {
        format!("[CODA]\nATO: {act}\nPREÇO: {cost}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{fixture_deck, fixture_lore, fixture_templates};
    use crate::nlg::lint::{Criterion, lint};
    use crate::nlg::microplan::plan_content;

    fn calm() -> Drift {
        Drift {
            entropy: 10,
            debt: 5,
            entropy_high: false,
            debt_high: false,
            marker: String::new(),
            echo: None,
            echo_in_draw: false,
        }
    }

    fn draw_of<'a>(deck: &'a ob_core::Deck, ids: [&str; 3]) -> Draw<'a> {
        Draw {
            past: deck.get(ids[0]).unwrap(),
            present: deck.get(ids[1]).unwrap(),
            future: deck.get(ids[2]).unwrap(),
        }
    }

    #[test]
    fn fallback_reading_has_full_skeleton() {
        let deck = fixture_deck();
        let bank = TemplateBank::new();
        let draw = draw_of(&deck, ["eco", "vazio", "mare"]);
        let content = plan_content(&draw);
        let body = Assembler::new(&bank).reading(
            &content,
            DiscourseRelation::Cause,
            &calm(),
            &mut SeededRng::new(1),
        );
        let lines: Vec<&str> = body.text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "[LEITURA]");
        assert_eq!(lines[1], "Tese: ação no presente define a direção.");
        assert_eq!(
            lines[2],
            "Passado: memória se acumulou enquanto obsessão crescia."
        );
        assert_eq!(lines[3], "Evidência: padrões que se repetem no mesmo ponto");
        assert_eq!(lines[5], "Evidência: sinais observáveis no presente");
        assert!(lines[7].starts_with("Condição (p"));
        assert!(lines[7].contains("então a tendência é ritmo"));
        assert_eq!(lines[8], "Evidência prevista: dias bons seguidos de dias vazios");
        assert_eq!(lines[10], "Limite: não confunda tendência com certeza.");
        assert!(body.interference_line.is_none());
        assert_eq!(body.evidence.future, "dias bons seguidos de dias vazios");
    }

    #[test]
    fn keyed_templates_and_references() {
        let deck = fixture_deck();
        let bank = fixture_templates();
        let draw = draw_of(&deck, ["ferro", "lamina", "mare"]);
        let content = plan_content(&draw);
        let body = Assembler::new(&bank).reading(
            &content,
            DiscourseRelation::Contrast,
            &calm(),
            &mut SeededRng::new(3),
        );
        let lines: Vec<&str> = body.text.lines().collect();
        assert_eq!(lines[1], "Tese: resistência cedeu; decisão pede outra forma.");
        assert_eq!(
            lines[2],
            "Passado: ◇ O Ferro firmou resistência, e rigidez veio junto."
        );
        assert_eq!(lines[3], "Evidência: prazos que você mesmo estica");
        assert_eq!(
            lines[7],
            "Condição (provável): Se você mantiver decisão, então a tendência é ritmo, mas dispersão cresce."
        );
    }

    #[test]
    fn present_exception_becomes_limit() {
        let deck = fixture_deck();
        let bank = TemplateBank::new();
        let draw = draw_of(&deck, ["mare", "ferro", "eco"]);
        let content = plan_content(&draw);
        let body = Assembler::new(&bank).reading(
            &content,
            DiscourseRelation::Condition,
            &calm(),
            &mut SeededRng::new(9),
        );
        assert!(body
            .text
            .ends_with("Limite: isto falha quando o limite é imposto por outro"));
    }

    #[test]
    fn echo_in_draw_uses_eco_template() {
        let deck = fixture_deck();
        let bank = fixture_templates();
        let draw = draw_of(&deck, ["ferro", "lamina", "eco"]);
        let content = plan_content(&draw);
        let drift = Drift {
            echo: Some("eco".into()),
            echo_in_draw: true,
            ..calm()
        };
        let body = Assembler::new(&bank).reading(
            &content,
            DiscourseRelation::Cause,
            &drift,
            &mut SeededRng::new(0),
        );
        assert!(body.text.contains("Evidência: o eco de eco volta a aparecer."));
    }

    #[test]
    fn echo_line_without_eco_templates() {
        let deck = fixture_deck();
        let bank = TemplateBank::new();
        let draw = draw_of(&deck, ["ferro", "lamina", "eco"]);
        let content = plan_content(&draw);
        let drift = Drift {
            echo: Some("eco".into()),
            echo_in_draw: true,
            ..calm()
        };
        let body = Assembler::new(&bank).reading(
            &content,
            DiscourseRelation::Cause,
            &drift,
            &mut SeededRng::new(0),
        );
        assert!(body.text.contains("Evidência: o eco de eco volta a aparecer."));
        assert!(!body.text.contains("Evidência prevista"));
    }

    #[test]
    fn high_entropy_adds_interference_line() {
        let deck = fixture_deck();
        let bank = TemplateBank::new();
        let draw = draw_of(&deck, ["eco", "vazio", "mare"]);
        let content = plan_content(&draw);
        let drift = Drift {
            entropy: 80,
            entropy_high: true,
            marker: "▒".into(),
            ..calm()
        };
        let body = Assembler::new(&bank).reading(
            &content,
            DiscourseRelation::Cause,
            &drift,
            &mut SeededRng::new(0),
        );
        let line = body.interference_line.unwrap();
        assert!(line.starts_with("[INTERFERÊNCIA] "));
        assert!(line.contains(" eco… eco… "));
    }

    #[test]
    fn act_from_intervention() {
        let deck = fixture_deck();
        let bank = TemplateBank::new();
        let content = SymbolContent::extract(deck.get("ferro").unwrap());
        let act = Assembler::new(&bank).act(&content, "trabalho", &mut SeededRng::new(0));
        assert_eq!(act, "Em 24h, anote três limites que você cedeu sobre trabalho.");
    }

    #[test]
    fn act_uses_action_templates_when_bank_has_them() {
        let deck = fixture_deck();
        let bank = TemplateBank::new()
            .with_flat("ato_templates", &["Até {prazo} ({prazo_horas}h): {acao}, tema {tema}."]);
        let content = SymbolContent::extract(deck.get("ferro").unwrap());
        let act = Assembler::new(&bank).act(&content, "geral", &mut SeededRng::new(0));
        assert_eq!(act, "Até 24h (24h): anote três limites que você cedeu, tema geral.");
    }

    #[test]
    fn generic_act_without_intervention() {
        let deck = fixture_deck();
        let bank = TemplateBank::new();
        let content = SymbolContent::extract(deck.get("lamina").unwrap());
        let act = Assembler::new(&bank).act(&content, "decisao", &mut SeededRng::new(0));
        assert_eq!(
            act,
            "Hoje, faça uma ação pequena de cortar sobre decisao: anote 3 evidências."
        );
        let bare = Symbol::new("x", "X", 0.0, 1);
        let act = Assembler::new(&bank).act(
            &SymbolContent::extract(&bare),
            "geral",
            &mut SeededRng::new(0),
        );
        assert!(act.contains("de agir sobre geral"));
    }

    #[test]
    fn multi_day_intervention_act_has_deadline() {
        let mut symbol = Symbol::new("x", "X", 0.0, 1);
        symbol.interventions = vec![ob_core::Intervention {
            action: "anote tudo".to_string(),
            deadline_hours: 72,
        }];
        let bank = TemplateBank::new();
        let content = SymbolContent::extract(&symbol);
        let act = Assembler::new(&bank).act(&content, "geral", &mut SeededRng::new(0));
        assert_eq!(act, "Em 3 dias, anote tudo sobre geral.");
        let report = crate::nlg::lint::lint("", &act, "");
        assert!(report.holds(crate::nlg::lint::Criterion::ActHasDeadline));
    }

    #[test]
    fn generic_act_skips_intervention_templates() {
        let deck = fixture_deck();
        let bank = TemplateBank::new().with_flat(
            "ato_templates",
            &[
                "Em {prazo}, {acao} sobre {tema}.",
                "Em 48h, escolha como {verbo} em {tema}: {passo}.",
            ],
        );
        let content = SymbolContent::extract(deck.get("lamina").unwrap());
        for seed in 0..8 {
            let act = Assembler::new(&bank).act(&content, "trabalho", &mut SeededRng::new(seed));
            assert_eq!(act, "Em 48h, escolha como cortar em trabalho: anote 3 evidências.");
        }

        let only_intervention =
            TemplateBank::new().with_flat("ato_templates", &["Em {prazo}, {acao} sobre {tema}."]);
        let act =
            Assembler::new(&only_intervention).act(&content, "trabalho", &mut SeededRng::new(0));
        assert_eq!(
            act,
            "Hoje, faça uma ação pequena de cortar sobre trabalho: anote 3 evidências."
        );
        let report = crate::nlg::lint::lint("", &act, "");
        assert!(report.holds(crate::nlg::lint::Criterion::ActHasDeadline));
        assert!(report.holds(crate::nlg::lint::Criterion::ActHasCriterion));
    }

    #[test]
    fn cost_substitutes_for_shadow() {
        let deck = fixture_deck();
        let bank = TemplateBank::new();
        let cost = Assembler::new(&bank).cost(deck.get("ferro").unwrap(), &mut SeededRng::new(0));
        assert!(cost.contains("renuncie a controle excessivo"));
        assert!(cost.contains("para que rigidez não governe"));
        let cost = Assembler::new(&bank).cost(deck.get("vazio").unwrap(), &mut SeededRng::new(0));
        assert!(cost.contains("renuncie a perguntar de novo por 48h"));
        assert!(cost.contains("para que algo não governe"));
    }

    #[test]
    fn renunciation_substitutions() {
        let s = |shadow: &str, r: &str| renunciation_for_shadow(shadow, r.to_string());
        assert_eq!(s("rigidez", "perguntar de novo"), "controle excessivo");
        assert_eq!(s("rigidez", "controle total"), "controle total");
        assert_eq!(s("dispersão", "x"), "multitarefa");
        assert_eq!(s("obsessão", "x"), "repetir a mesma pergunta");
        assert_eq!(s("obsessão", "a pergunta"), "a pergunta");
        assert_eq!(s("ruptura", "x"), "x");
        assert_eq!(forbidden_action("perguntar de novo"), "perguntar de novo");
        assert_eq!(forbidden_action("repetir a mesma"), "repetir");
        assert_eq!(forbidden_action("multitarefa"), "fazer");
    }

    #[test]
    fn fallback_reading_passes_linter() {
        let deck = fixture_deck();
        let bank = TemplateBank::new();
        let assembler = Assembler::new(&bank);
        for seed in 0..30 {
            let mut rng = SeededRng::new(seed);
            let draw = draw_of(&deck, ["mare", "ferro", "lamina"]);
            let content = plan_content(&draw);
            let body = assembler.reading(&content, DiscourseRelation::Cause, &calm(), &mut rng);
            let act = assembler.act(&content[1], "trabalho", &mut rng);
            let cost = assembler.cost(draw.future, &mut rng);
            let report = lint(&body.text, &act, &cost);
            assert!(report.passed(), "seed {seed}: {:?}", report.violations());
            assert!(report.holds(Criterion::HasCondition));
        }
    }

    #[test]
    fn seal_variants() {
        let lore = fixture_lore();
        assert_eq!(seal(&lore, &calm()), "[SELO]\n🜍 OBSERVADOR — Eu vejo o que insiste.");
        let debt = Drift {
            debt: 70,
            debt_high: true,
            ..calm()
        };
        assert_eq!(seal(&lore, &debt), "[SELO]\n🜍 OBSERVADOR — O preço aumenta.");
        let noisy = Drift {
            entropy_high: true,
            marker: "░".into(),
            ..debt
        };
        assert_eq!(
            seal(&lore, &noisy),
            "[SELO]\n░ OBSERVADOR — Eu vejo o que insiste. ░"
        );
    }

    #[test]
    fn liturgy_variants() {
        let lore = fixture_lore();
        assert_eq!(
            liturgy(&lore, &calm()),
            "[LITURGIA]\nLeis aplicáveis: L1, L2, L3\nCusto do momento: Entropia 10%, Dívida 5%"
        );
        let echo = Drift {
            echo: Some("eco".into()),
            echo_in_draw: true,
            ..calm()
        };
        assert!(liturgy(&lore, &echo).contains("| Eco detectado: eco"));
        let absent_echo = Drift {
            echo_in_draw: false,
            ..echo
        };
        assert!(liturgy(&lore, &absent_echo).contains("Leis aplicáveis"));
        let debt = Drift {
            debt: 55,
            debt_high: true,
            ..calm()
        };
        assert!(liturgy(&lore, &debt).contains("Dívida acumulada: 55%. O Véu endurece."));
        let noisy = Drift {
            entropy: 75,
            entropy_high: true,
            marker: "▓".into(),
            ..calm()
        };
        assert!(liturgy(&lore, &noisy).ends_with("Ruído: 75%"));
    }

    #[test]
    fn coda_mentions_debt_when_high() {
        assert_eq!(coda("a", "b", &calm()), "[CODA]\nATO: a\nPREÇO: b");
        let debt = Drift {
            debt: 60,
            debt_high: true,
            ..calm()
        };
        assert!(coda("a", "b", &debt).ends_with("(Dívida acumulada: 60%)"));
    }

    #[test]
    fn drift_assessment() {
        let deck = fixture_deck();
        let draw = draw_of(&deck, ["eco", "vazio", "mare"]);
        let config = EngineConfig::default();
        let markers = vec!["░".to_string()];
        let mut state = SessionState::with_seed_base("t");
        state.entropy = 61;
        state.debt = 50;
        state.update_memory(["eco", "eco"], []);
        let drift = Drift::assess(&state, &config, &markers, &draw, &mut SeededRng::new(0));
        assert!(drift.entropy_high);
        assert!(!drift.debt_high);
        assert_eq!(drift.marker, "░");
        assert_eq!(drift.echo.as_deref(), Some("eco"));
        assert!(drift.echo_in_draw);
    }
}
