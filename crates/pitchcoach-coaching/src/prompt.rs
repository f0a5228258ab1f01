//! Coaching prompt construction.

use pitchcoach_core::Role;

use crate::metrics::{talk_to_listen_recommendation, ConversationMetrics};
use crate::types::CoachingContext;

/// System prompt framing the model as a sales coach.
pub const SYSTEM_PROMPT: &str = "You are an expert B2B sales coach reviewing a sales rep's \
responses during role-play training. Be specific, concise and constructive. \
Reply with a single JSON object and nothing else.";

const RESPONSE_SCHEMA: &str = r#"{
  "suggestions": [
    {
      "type": "hint|warning|success|improvement",
      "priority": "high|medium|low",
      "message": "Brief coaching message",
      "suggestion": "Specific actionable suggestion",
      "keywords": ["keyword1", "keyword2"],
      "confidence": 0.85
    }
  ],
  "overallScore": 75,
  "strengths": ["strength1", "strength2"],
  "weaknesses": ["weakness1", "weakness2"],
  "nextSteps": ["step1", "step2"]
}"#;

fn speaker(role: Role) -> &'static str {
    match role {
        Role::Rep => "Rep",
        Role::Prospect => "Prospect",
    }
}

/// Build the user prompt for one coaching request.
#[must_use]
pub fn build_coaching_prompt(ctx: &CoachingContext, metrics: &ConversationMetrics) -> String {
    let scenario = &ctx.scenario;

    let key_points = if scenario.key_points.is_empty() {
        "(none listed)".to_string()
    } else {
        scenario
            .key_points
            .iter()
            .enumerate()
            .map(|(i, point)| format!("{}. {point}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let history = if ctx.transcript.is_empty() {
        "(no prior messages)".to_string()
    } else {
        ctx.transcript
            .iter()
            .map(|m| format!("{}: {}", speaker(m.role), m.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    let talk = &metrics.talk_to_listen;
    let questions = &metrics.questions;

    format!(
        "# Context
- Scenario: {id}
- Objection Category: {category}
- Turn Number: {turn}
- Prospect Persona: {persona}

# Key Points to Address
{key_points}

# Conversation Metrics
- Talk-to-listen ratio: {ratio:.2} ({status}); {tip}
- Questions: {rep_q} from rep ({discovery} discovery), {prospect_q} from prospect
- Objections: {detected} detected, {handled} estimated handled
- Turns: {rep_turns} rep, {prospect_turns} prospect

# Conversation History
{history}

# Rep's Current Response
{message}

# Your Task
Analyze the rep's response and provide real-time coaching. Consider:
1. Are they addressing the key points?
2. Are they communicating the product's value propositions effectively?
3. Are they handling the objection appropriately?
4. What could they improve?
5. What are they doing well?

Respond in JSON format:
{RESPONSE_SCHEMA}",
        id = scenario.id,
        category = scenario.objection_category,
        turn = ctx.turn_number,
        persona = scenario.persona.summary(),
        ratio = talk.ratio,
        status = talk.status,
        tip = talk_to_listen_recommendation(talk.ratio, talk.status),
        rep_q = questions.rep_questions,
        discovery = questions.discovery_questions,
        prospect_q = questions.prospect_questions,
        detected = metrics.objections.detected,
        handled = metrics.objections.handled,
        rep_turns = metrics.flow.rep_turns,
        prospect_turns = metrics.flow.prospect_turns,
        message = ctx.user_message,
    )
}
