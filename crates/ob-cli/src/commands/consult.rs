use std::path::Path;

use super::{Outcome, SessionFiles};
use crate::render;

pub fn run(dir: &Path, question: &str, files: &SessionFiles, json: bool) -> Result<(), String> {
    let oracle = super::load_oracle(dir)?;
    let mut state = super::load_state(files)?;

    match super::ask(&oracle, &mut state, question, files)? {
        Outcome::Reading(out) if json => println!("{}", render::json(&out)?),
        Outcome::Reading(out) => render::print_reading(&out),
        Outcome::Refused {
            response,
            alternative,
            crisis,
        } if json => {
            let doc = serde_json::json!({
                "refused": true,
                "crisis": crisis,
                "response": response,
                "alternative": alternative,
            });
            println!("{doc:#}");
        }
        Outcome::Refused {
            response,
            alternative,
            crisis,
        } => render::print_refusal(&response, &alternative, crisis),
    }

    Ok(())
}
