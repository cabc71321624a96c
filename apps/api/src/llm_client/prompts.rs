// Cross-cutting prompt fragments shared by the extraction variants.
// Each task-specific template lives in extraction::prompts and splices
// these in — the classification vocabulary is written down exactly once.

/// The four experience buckets — the closed output vocabulary for
/// experience-level classification.
pub const EXPERIENCE_BINS: &str = "\
- Entry (0-2 Years)
- Mid (3-5 Years)
- Senior (6-8 Years)
- Lead (8+ Years)";

/// Year-string to bucket mapping. This is prompt-level policy: the code never
/// re-interprets year strings, so "2+ years" = Mid lives here and only here.
pub const EXPERIENCE_MAPPING_RULES: &str = r#"• "1+ years" or "minimum 1 year" = Entry (0-2 Years)
• "2+ years" or "minimum 2 years" = Mid (3-5 Years)
• "5+ years" or "minimum 5 years" = Senior (6-8 Years)
• "8+ years" or "minimum 8 years" = Lead (8+ Years)"#;

/// Title-derived seniority rules the URL variants apply on top of the year
/// mapping.
pub const TITLE_SENIORITY_RULES: &str = r#"• Job titles with "Senior", "Lead", "Principal" = Senior (6-8 Years) or Lead (8+ Years) ONLY if content supports it
• Job titles with "Entry", "Junior", "Associate" = Entry (0-2 Years)
• Job titles with "Mid", "Intermediate" = Mid (3-5 Years)"#;

/// What to look for in a posting when hunting experience requirements.
pub const POSTING_SIGNALS: &str = r#"- The complete job title (usually in the header or title section)
- Years of experience required (e.g., "3+ years", "minimum 5 years", "2-4 years")
- Seniority level indicators in the job description (e.g., "Senior", "Lead", "Principal", "Entry-level", "Mid-level")
- Any specific experience requirements mentioned in the job description
- Salary ranges that indicate experience level (higher salaries typically indicate more senior roles)"#;

/// Guardrail block for the web-search variants: classify from the posting
/// body, never from the URL or surrounding site.
pub const CONTENT_ONLY_INSTRUCTIONS: &str = r#"CRITICAL INSTRUCTIONS:
- Analyze ONLY the job posting content, not the URL or website structure
- If the job title says "Senior" but the content says "entry-level", trust the content over the title
- If the job title says "Senior" and the content supports senior-level requirements, classify as Senior
- Do NOT make assumptions based on URL paths or website context"#;

/// Title-cleaning rules: strip organization, department, and geography
/// tokens; keep role, team, seniority, and specialization tokens.
pub const TITLE_CLEANING_RULES: &str = r#"- Remove: Company names (e.g., "EY", "EY-Parthenon", "EY Foundry"), geographic locations (e.g., "USA"), department prefixes (e.g., "Tax - Other Tax -")
- Keep: Product team names (e.g., "Google Fi and Store", "Payments Team", "Chelsea")
- Keep: Core role title (e.g., "Data Engineer", "Quantitative Finance", "Product Manager")
- Keep: Technical focus areas (e.g., "Infrastructure", "Backend", "Frontend")
- Keep: Seniority indicators (e.g., "Senior", "Lead", "Principal", "Staff")
- Keep: Specialization areas that affect requirements (e.g., "Economics", "Machine Learning", "ALWIN")"#;

/// Worked title-cleaning examples shared by the URL variants.
pub const TITLE_CLEANING_EXAMPLES: &str = r#"- "Data Engineer, Google Fi and Store, Infrastructure" → "Data Engineer, Google Fi and Store, Infrastructure" (keep all)
- "USA - EY-Parthenon - Corporate Finance - Quantitative Finance and Economics" → "Quantitative Finance and Economics" (remove company prefix)
- "USA - Tax - Other Tax - EY Foundry Product Manager - Chelsea - Staff" → "Product Manager, Chelsea, Staff" (remove company/geographic prefixes)
- "Senior Software Engineer, Backend, Payments Team" → "Senior Software Engineer, Backend, Payments Team" (keep all)"#;
