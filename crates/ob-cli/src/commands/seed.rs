use ob_engine::{derive_seed, normalize_question};

pub fn run(base: &str, question: &str, counter: u64, attempt: Option<u8>) -> Result<(), String> {
    tracing::debug!(normalized = %normalize_question(question), counter, ?attempt, "deriving seed");
    let seed = derive_seed(base, question, counter, attempt).map_err(|e| e.to_string())?;
    println!("{seed}");
    Ok(())
}
