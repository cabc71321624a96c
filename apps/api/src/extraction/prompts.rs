//! Prompt templates for the extraction variants.
//!
//! Templates carry `{placeholder}` markers; builder functions splice in the
//! cross-cutting fragments from `llm_client::prompts` first, then the request
//! data. Rendering is pure — same inputs, same prompt, including on retries.

use crate::llm_client::prompts::{
    CONTENT_ONLY_INSTRUCTIONS, EXPERIENCE_BINS, EXPERIENCE_MAPPING_RULES, POSTING_SIGNALS,
    TITLE_CLEANING_EXAMPLES, TITLE_CLEANING_RULES, TITLE_SENIORITY_RULES,
};

/// Detail extraction from pasted title + description.
const TEXT_EXTRACTION_TEMPLATE: &str = r#"You are an AI that extracts job details and always outputs a single valid JSON object.

Input:
Job Title: {job_title}
Job Description: {job_description}

Rules:
- Clean the job title:
  • Remove company names, departments, timelines, and duplicate words
  • Keep only role + specialization + seniority (e.g., "Senior Data Engineer Intern")
- Extract:
  • city → only city/state abbreviation (e.g., "Richmond, VA" not "Richmond, Virginia"), drop country. If multiple cities listed, pick the FIRST one only. If not found, return null.
  • work_arrangement → one of: ["remote", "hybrid", "on-site"]. CRITICAL: Always return lowercase only ("hybrid" not "Hybrid"). If not found, return null.
  • experience → one of:
{experience_bins}
    If unclear, return null.
- CRITICAL: DO NOT MAKE UP INFORMATION. Only extract what is explicitly stated in the job description.
- For experience level: Look for explicit mentions of years of experience, seniority keywords, or job level indicators. If none are found, return null.
- Experience level mapping (CRITICAL - follow this exactly):
{experience_mapping_rules}
- IMPORTANT: "2+ years" ALWAYS equals Mid (3-5 Years), NOT Entry
- Do not infer experience level from job title alone unless it clearly indicates seniority (e.g., "Senior", "Lead", "Principal").
- Output must be strictly JSON, no extra text, no explanations.
- FINAL CHECK: work_arrangement must be lowercase ("hybrid", "remote", "on-site") - NEVER capitalized.

Output Format (use this structure but extract from the ACTUAL job description above):
{
  "job_title": "[extract from job title]",
  "city": "[extract from job description or null]",
  "work_arrangement": "[remote/hybrid/on-site or null] (MUST be lowercase)",
  "experience": "[Entry (0-2 Years)/Mid (3-5 Years)/Senior (6-8 Years)/Lead (8+ Years) or null]"
}"#;

/// Detail extraction straight from a posting URL, via the model's web search.
const LINK_EXTRACTION_TEMPLATE: &str = r#"You have web search capabilities. Please search for and analyze the job posting at this URL: {job_link}

Your task is to extract job details and find the experience level requirements for this job posting by analyzing ONLY the actual job posting content. Look for:
{posting_signals}

JOB TITLE CLEANING RULES - FOLLOW EXACTLY:
{title_cleaning_rules}

Examples:
{title_cleaning_examples}

{content_only_instructions}

Based on your analysis, classify the experience level into one of these bins:
{experience_bins}

Experience level mapping rules:
{experience_mapping_rules}
{title_seniority_rules}

If no clear experience requirement is found, return null.

Output ONLY a valid JSON object in this exact format:
{
  "job_title": "[cleaned job title following the rules above - remove company names, keep role and team info]",
  "city": "[extract from job description or null]",
  "work_arrangement": "[remote/hybrid/on-site or null] (MUST be lowercase)",
  "experience": "[Entry (0-2 Years)/Mid (3-5 Years)/Senior (6-8 Years)/Lead (8+ Years) or null]"
}"#;

/// Experience-only extraction from a posting URL, with the step-by-step
/// title-cleaning process.
const EXPERIENCE_SEARCH_TEMPLATE: &str = r#"You have web search capabilities. Please search for and analyze the job posting at this URL: {job_link}

Your task is to:
1. Extract the complete job title from the job posting content
2. Clean the job title according to the rules below
3. Find the experience level requirements from the job posting content

Look for in the job posting content:
{posting_signals}

JOB TITLE CLEANING - STEP BY STEP PROCESS:

STEP 1: Extract the complete job title from the job posting content
STEP 2: Apply these cleaning rules in order:
   a) Remove: company names, geographic prefixes, and department prefixes (e.g., "USA", "Tax - Other Tax -", "EY", "EY Foundry", "EY-Parthenon")
   b) Keep: role titles, team names, seniority, and specializations (e.g., "Product Manager", "Chelsea", "Staff", "Tax Technology and Transformation", "TTT", "ALWIN")
   c) Format: Use commas to separate meaningful parts

CRITICAL EXAMPLES - COPY THIS FORMAT EXACTLY:
- "USA Tax - Other Tax - EY Foundry Product Manager - Chelsea Staff" → "Product Manager, Chelsea, Staff"
- "USA Tax - Tax Technology and Transformation (TTT) - Alwin Staff" → "Tax Technology and Transformation (TTT), ALWIN, Staff"
- "Data Engineer, Google Fi and Store, Infrastructure" → "Data Engineer, Google Fi and Store, Infrastructure" (keep all)
- "Senior Software Engineer, Backend, Payments Team" → "Senior Software Engineer, Backend, Payments Team" (keep all)

{content_only_instructions}

Based on your analysis, classify the experience level into one of these bins:
{experience_bins}

Experience level mapping rules:
{experience_mapping_rules}
{title_seniority_rules}

If no clear experience requirement is found, return null.

Output ONLY a valid JSON object in this exact format:
{
  "job_link": "{job_link}",
  "job_title": "[cleaned job title following the cleaning rules above - remove company names, keep role and team info]",
  "experience_level": "[Entry (0-2 Years)/Mid (3-5 Years)/Senior (6-8 Years)/Lead (8+ Years)/null]",
  "found_requirements": "[brief description of what experience requirements were found]",
  "confidence": "[high/medium/low]"
}

CRITICAL: The job_title field must follow the cleaning rules EXACTLY.
- Remove ALL company names and geographic prefixes
- Keep ALL meaningful details (team, seniority, specialization)
- Use proper comma formatting and capitalization
- Follow the examples above precisely"#;

/// Relevance scoring of a posting against a target search intent.
const RELEVANCE_TEMPLATE: &str = r#"You are a job relevance evaluator. Given a job title, description, and a target search intent, return how relevant the job is (0–100). Respond ONLY in this JSON format: {"score": <number>, "relevant": true/false, "reason": "<short reason>"}

Search intent: Relevant "{job_type}" positions.

Job title: {job_title}

Job Description: {job_description}"#;

/// Diagnostic probe: report the raw title as it appears in the posting.
const TITLE_PROBE_TEMPLATE: &str = r#"You have web search capabilities. Please search for and analyze the job posting at this URL: {job_link}

Your task is to find the job title from the job posting content. Look for:
- The main job title (usually in the header or title section)
- Any additional title information
- Team names or specializations mentioned

Please tell me exactly what job title you find in the job posting content. Be specific about what you see.

Output ONLY a valid JSON object in this exact format:
{
  "job_link": "{job_link}",
  "found_title": "[exact job title as it appears in the job posting]",
  "title_location": "[where in the posting you found this title]"
}"#;

pub fn text_extraction_prompt(job_title: &str, job_description: &str) -> String {
    TEXT_EXTRACTION_TEMPLATE
        .replace("{experience_bins}", EXPERIENCE_BINS)
        .replace("{experience_mapping_rules}", EXPERIENCE_MAPPING_RULES)
        .replace("{job_title}", job_title)
        .replace("{job_description}", job_description)
}

pub fn link_extraction_prompt(job_link: &str) -> String {
    LINK_EXTRACTION_TEMPLATE
        .replace("{posting_signals}", POSTING_SIGNALS)
        .replace("{title_cleaning_rules}", TITLE_CLEANING_RULES)
        .replace("{title_cleaning_examples}", TITLE_CLEANING_EXAMPLES)
        .replace("{content_only_instructions}", CONTENT_ONLY_INSTRUCTIONS)
        .replace("{experience_bins}", EXPERIENCE_BINS)
        .replace("{experience_mapping_rules}", EXPERIENCE_MAPPING_RULES)
        .replace("{title_seniority_rules}", TITLE_SENIORITY_RULES)
        .replace("{job_link}", job_link)
}

pub fn experience_search_prompt(job_link: &str) -> String {
    EXPERIENCE_SEARCH_TEMPLATE
        .replace("{posting_signals}", POSTING_SIGNALS)
        .replace("{content_only_instructions}", CONTENT_ONLY_INSTRUCTIONS)
        .replace("{experience_bins}", EXPERIENCE_BINS)
        .replace("{experience_mapping_rules}", EXPERIENCE_MAPPING_RULES)
        .replace("{title_seniority_rules}", TITLE_SENIORITY_RULES)
        .replace("{job_link}", job_link)
}

pub fn relevance_prompt(job_title: &str, job_description: &str, job_type: &str) -> String {
    RELEVANCE_TEMPLATE
        .replace("{job_type}", job_type)
        .replace("{job_title}", job_title)
        .replace("{job_description}", job_description)
}

pub fn title_probe_prompt(job_link: &str) -> String {
    TITLE_PROBE_TEMPLATE.replace("{job_link}", job_link)
}
