//! Text rendering for the CLI

use crate::agents::BuyerAgent;
use crate::money::{money, money_signed};
use crate::negotiation::NegotiationResult;
use crate::scenario::ScenarioTriplet;
use std::fmt::Write;

use super::app::{ScenarioRun, SuiteSummary};

const RULE: &str = "============================================================";

/// Header, preset line and outcome for one scenario
pub fn render_run(run: &ScenarioRun, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Test: {} - {}", run.product, run.preset.difficulty);
    let _ = writeln!(
        out,
        "Budget: {} | Market: {} | Seller min: {}",
        money(run.preset.buyer_budget, currency),
        money(run.result.market_price, currency),
        money(run.preset.seller_min, currency)
    );
    out.push_str(&render_outcome(&run.result, currency));
    out
}

pub fn render_outcome(result: &NegotiationResult, currency: &str) -> String {
    let mut out = String::new();
    match result.final_price {
        Some(price) => {
            let _ = writeln!(out, "DEAL at {} in {} rounds", money(price, currency), result.rounds_used);
            let _ = writeln!(
                out,
                "   Savings: {} ({:.1}%)",
                money_signed(result.savings, currency),
                result.savings_pct
            );
            let _ = writeln!(out, "   Below Market: {:.1}%", result.below_market_pct);
        }
        None => {
            let _ = writeln!(
                out,
                "NO DEAL ({:?}) after {} rounds",
                result.status, result.rounds_used
            );
        }
    }
    if let Some(progress) = &result.progress {
        let _ = writeln!(
            out,
            "   Convergence: {:.1}% | Gap: {} | Seller moved {:.1}% | Buyer moved {:.1}%",
            progress.convergence_rate * 100.0,
            money_signed(progress.current_gap, currency),
            progress.seller_flexibility * 100.0,
            progress.buyer_flexibility * 100.0
        );
    }
    for violation in &result.policy_violations {
        let _ = writeln!(out, "   Policy violation: {:?}", violation);
    }
    out
}

pub fn render_transcript(result: &NegotiationResult) -> String {
    let mut out = String::new();
    for entry in &result.transcript {
        let _ = writeln!(out, "  [{}] {}", entry.role, entry.message);
    }
    out
}

pub fn render_summary(summary: &SuiteSummary, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "Deals Completed: {}/{}", summary.deals_made, summary.runs.len());
    let _ = writeln!(out, "Total Savings: {}", money_signed(summary.total_savings, currency));
    let _ = writeln!(out, "Success Rate: {:.1}%", summary.success_rate);
    let _ = writeln!(out, "{}", RULE);
    out
}

pub fn render_presets(market_price: u64, triplet: &ScenarioTriplet, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Market price: {}", money(market_price, currency));
    for preset in triplet.iter() {
        let _ = writeln!(
            out,
            "  {:<6} budget {:>12}  seller min {:>12}",
            preset.difficulty.to_string(),
            money(preset.buyer_budget, currency),
            money(preset.seller_min, currency)
        );
    }
    out
}

pub fn render_persona(buyer: &dyn BuyerAgent) -> String {
    let personality = buyer.personality();
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "BUYER: {}", buyer.name());
    let _ = writeln!(out, "Personality: {}", personality.personality_type);
    let _ = writeln!(out, "Traits: {}", personality.traits.join(", "));
    let _ = writeln!(out, "Style: {}", personality.negotiation_style);
    let _ = writeln!(out, "Catchphrases:");
    for phrase in &personality.catchphrases {
        let _ = writeln!(out, "  - {}", phrase);
    }
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}", buyer.personality_prompt());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{BuyerKind, FixedPhrase, SellerKind};
    use crate::catalog::sample_products;
    use crate::cli::app::HaggleApp;
    use crate::config::Settings;
    use crate::scenario::{scenario_triplets, Difficulty};
    use std::sync::Arc;

    fn easy_run() -> ScenarioRun {
        HaggleApp::new(Settings::default())
            .with_phrases(Arc::new(FixedPhrase(0)))
            .run_scenario(
                BuyerKind::Strategic,
                SellerKind::Standard,
                &sample_products()[0],
                Difficulty::Easy,
            )
            .unwrap()
    }

    #[test]
    fn test_render_run() {
        let text = render_run(&easy_run(), "₹");

        assert!(text.starts_with("Test: Alphonso Mangoes - easy\n"));
        assert!(text.contains("Budget: ₹216,000 | Market: ₹180,000 | Seller min: ₹144,000"));
        assert!(text.contains("DEAL at ₹159,355 in 3 rounds"));
        assert!(text.contains("Savings: ₹56,645 (26.2%)"));
        assert!(text.contains("Below Market: 11.5%"));
        assert!(text.contains("Convergence: 87.9% | Gap: ₹15,177"));
    }

    #[test]
    fn test_render_transcript() {
        let text = render_transcript(&easy_run().result);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("  [seller] These are premium A grade"));
        assert!(lines[1].starts_with("  [buyer] "));
        assert_eq!(lines[6], "  [seller] You have a deal at ₹159,355!");
    }

    #[test]
    fn test_render_presets() {
        let text = render_presets(180_000, &scenario_triplets(180_000), "₹");
        assert!(text.contains("hard"));
        assert!(text.contains("₹147,600"));
    }

    #[test]
    fn test_render_persona() {
        let buyer = BuyerKind::Cautious.build(Arc::new(FixedPhrase(0)), "₹");
        let text = render_persona(buyer.as_ref());

        assert!(text.contains("BUYER: CautiousBuyer"));
        assert!(text.contains("  - That's a bit steep for me"));
    }
}
