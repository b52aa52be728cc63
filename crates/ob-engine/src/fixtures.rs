//! Shared test fixtures.

use ob_core::{Correspondences, Deck, Intervention, Lore, Symbol, TemplateBank};

fn corr(element: &str, quality: &str, verb: &str, shadow: &str) -> Correspondences {
    Correspondences {
        element: Some(element.to_string()),
        ruling_body: Some("Marte".to_string()),
        quality: Some(quality.to_string()),
        verb: Some(verb.to_string()),
        shadow: Some(shadow.to_string()),
    }
}

/// Five symbols with known base weights for a keyword-free question:
/// ferro 1.0, mare 1.0, eco 0.8, lamina 0.6, vazio 0.3.
pub(crate) fn fixture_deck() -> Deck {
    let mut ferro = Symbol::new("ferro", "O Ferro", 0.4, 1)
        .with_domains(&["limite", "trabalho"])
        .with_correspondences(corr("terra", "resistência", "limitar", "rigidez"))
        .with_triggers(&["emprego", "chefe"])
        .with_contraindications(&["festa"]);
    ferro.observable_signals = vec!["prazos que você mesmo estica".to_string()];
    ferro.interventions = vec![Intervention {
        action: "anote três limites que você cedeu".to_string(),
        deadline_hours: 24,
    }];
    ferro.exceptions = vec!["isto falha quando o limite é imposto por outro".to_string()];

    let mut mare = Symbol::new("mare", "A Maré", -0.2, 2)
        .with_domains(&["ciclo"])
        .with_correspondences(corr("agua", "ritmo", "fluir", "dispersão"))
        .with_contraindications(&["emprego"]);
    mare.observable_signals = vec!["dias bons seguidos de dias vazios".to_string()];

    let eco = Symbol::new("eco", "O Eco", 0.1, 3)
        .with_domains(&["memoria"])
        .with_correspondences(corr("ar", "memória", "retornar", "obsessão"));

    let lamina = Symbol::new("lamina", "A Lâmina", -0.6, 4)
        .with_domains(&["decisao", "trabalho"])
        .with_correspondences(corr("fogo", "decisão", "cortar", "ruptura"))
        .with_triggers(&["mudar"]);

    let vazio = Symbol::new("vazio", "Vazio", 0.0, 5).with_domains(&["silencio"]);

    Deck::new(vec![ferro, mare, eco, lamina, vazio]).unwrap()
}

/// Lore with three laws and one ordinary and one crisis taboo.
pub(crate) fn fixture_lore() -> Lore {
    Lore::from_json(
        r#"{
            "entity": {"name": "OBSERVADOR", "signature": {"seal_glyph": "🜍", "tagline": "Eu vejo o que insiste."}},
            "laws": [{"id": "L1"}, {"id": "L2"}, {"id": "L3"}, {"id": "L4"}],
            "effects": {"interference_threshold": 60, "interference_markers": ["░"]},
            "taboos": [
                {"id": "T1", "triggers": ["loteria"], "response": "Não vejo números.", "debt_delta": 15, "entropy_delta": 5, "alternative": "Pergunte sobre o que fazer com o desejo."},
                {"id": "T6", "triggers": ["me matar"], "response": "Eu não selo portas finais.", "alternative": "Procure ajuda agora.", "crisis": true}
            ]
        }"#,
    )
    .unwrap()
}

/// A small template bank that exercises keyed and flat categories.
pub(crate) fn fixture_templates() -> TemplateBank {
    TemplateBank::new()
        .with_keyed(
            "thesis_templates",
            "CONTRAST",
            &["Tese: {past_quality} cedeu; {present_quality} pede outra forma."],
        )
        .with_keyed(
            "finding_past_templates",
            "terra",
            &["Passado: {past_ref} firmou {past_quality}, e {past_shadow} veio junto."],
        )
        .with_flat("qualifier_templates", &["provável"])
        .with_flat(
            "eco_templates",
            &["Evidência: o eco de {echo_symbol} volta a aparecer."],
        )
}
