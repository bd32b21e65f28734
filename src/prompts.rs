//! Prompt construction for the analysis call.

/// System instruction sent alongside every analysis request.
pub const SYSTEM_MESSAGE: &str = "You are a product intelligence engine. Always respond with valid JSON that matches the requested schema.";

/// Build the analysis instruction, embedding both inputs verbatim.
pub fn build_analysis_prompt(product_name: &str, product_description: &str) -> String {
    format!(
        r#"Act as a product intelligence engine.
I have a product named "{product_name}".
Description: "{product_description}".

I need you to SIMULATE scraping 20-30 diverse user reviews from sources like Reddit, Twitter, and Product Hunt.

Based on these simulated reviews, perform the following:
1. Generate the raw reviews with realistic content, user handles, like counts and recent dates.
2. Classify each review by sentiment (Positive, Neutral, Negative) and category (Bug Report, Feature Request, Praise, General Feedback).
3. Identify top feature requests based on the reviews and rank them with Impact vs Effort scores on a 1-10 integer scale and a High/Medium/Low priority, cross-referenced to the ids of the contributing reviews.
4. Provide a high-level executive summary of the public reception.

Return the data strictly in the requested JSON schema."#
    )
}
