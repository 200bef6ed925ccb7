use anyhow::Context;
use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;

use crate::domain::campaign::{CampaignContext, GeneratedMessage};
use crate::services::pipeline::MessageComposer;

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
}

impl Default for OpenaiClient {
    fn default() -> Self {
        OpenaiClient {
            client: Client::new(),
        }
    }
}

impl OpenaiClient {
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        OpenaiClient {
            client: Client::with_config(config),
        }
    }

    pub async fn generate_personalized_message(
        &self,
        profile_text: &str,
        campaign: &CampaignContext,
    ) -> anyhow::Result<GeneratedMessage> {
        let prompt = build_prompt(profile_text, campaign);

        let request = CreateChatCompletionRequestArgs::default()
            .model("gpt-4o-mini")
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .max_tokens(1000_u32)
            .build()?;

        let response = self.client.chat().create(request).await?;

        let first_choice = response
            .choices
            .first()
            .context("No choices in Openai response")?
            .message
            .content
            .clone()
            .context("No content")?;

        parse_generated_message(&first_choice)
    }
}

#[async_trait]
impl MessageComposer for OpenaiClient {
    async fn compose(
        &self,
        profile_text: &str,
        campaign: &CampaignContext,
    ) -> anyhow::Result<GeneratedMessage> {
        self.generate_personalized_message(profile_text, campaign)
            .await
    }
}

/// Models often wrap the JSON in markdown fences despite the instructions;
/// strip them before parsing.
pub fn parse_generated_message(raw: &str) -> anyhow::Result<GeneratedMessage> {
    let cleaned = raw.replace("```json", "").replace("```", "");

    serde_json::from_str(cleaned.trim()).context("Model returned unparseable message json")
}

fn build_prompt(profile_text: &str, campaign: &CampaignContext) -> String {
    format!(
        r#"Your task is to act as an expert B2B Sales Development Representative (SDR). You will draft a hyper-personalized LinkedIn connection request message.

**Campaign Details:**
- Product/Service: {product_description}
- Target Industry: {target_industry}
- Ideal Job Roles: {ideal_job_roles}
- Outreach Goal: {outreach_goal}
- Brand Voice: {brand_voice}

**Prospect's Raw LinkedIn Profile Text:**
---
{profile_text}
---

**Your Thought Process (Follow these steps):**
1.  **Filter the Noise:** The raw text above is messy and contains irrelevant data, navigation links, and code from the webpage. IGNORE all of this noise. Focus ONLY on the human-written content that belongs to the user's profile (like their name, headline, summary/about section, experience descriptions, and posts).
2.  **Analyze the Hook:** From the clean, relevant profile text you filtered, identify the single most compelling and unique piece of information to use as a personalized hook. This could be a recent post, a specific achievement, a shared interest, or a volunteer activity.
3.  **Connect to Value:** Briefly explain how the hook you found relates to the product/service you are offering.
4.  **Draft the Message:** Based on the hook and value connection, write a short, concise, and compelling connection message. The message MUST be under 300 characters. Adhere strictly to the requested '{brand_voice}' brand voice.
5.  **Final Output:** Present your final answer ONLY as a valid JSON object. Do not include any text or markdown before or after the JSON.

**Example Output Format:**
{{
  "thought_process": "The user recently posted about the challenges of onboarding new remote hires. This is a perfect hook because our product directly solves that problem by automating the process.",
  "personalized_message": "Hi [Name], saw your post on remote onboarding challenges. My company helps HR teams automate that process. Thought you might find it interesting."
}}

**Now, generate the output for the provided profile and campaign.**"#,
        product_description = campaign.product_description,
        target_industry = campaign.target_industry,
        ideal_job_roles = campaign.ideal_job_roles,
        outreach_goal = campaign.outreach_goal,
        brand_voice = campaign.brand_voice,
        profile_text = profile_text,
    )
}
