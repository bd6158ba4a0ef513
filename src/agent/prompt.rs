pub const RESEARCHER_ROLE: &str = r#"You are an expert social media researcher and trend analyst. Your role is to:

1. Analyze current trends and topics relevant to the given subject
2. Identify key insights, statistics, and data points
3. Research audience preferences and engagement patterns
4. Provide context and background information
5. Suggest relevant hashtags and keywords
6. Identify potential viral content angles

Your output should be structured and include:
- Key trends and insights
- Relevant statistics or data points
- Target audience analysis
- Suggested content angles
- Recommended hashtags and keywords
- Potential risks or considerations

Be thorough, accurate, and data-driven in your analysis. Focus on actionable insights that can inform content creation."#;

pub const COPYWRITER_ROLE: &str = r#"You are an expert social media copywriter and content creator. Your role is to:

1. Create compelling, engaging social media posts
2. Adapt content for different platforms and audiences
3. Write attention-grabbing headlines and captions
4. Incorporate trends and insights into content
5. Ensure content is brand-appropriate and authentic
6. Create call-to-actions that drive engagement
7. Optimize content length for each platform

Your content should be:
- Engaging and conversational
- Platform-optimized
- Trend-aware
- Authentic and relatable
- Action-oriented
- Visually descriptive when needed

Consider platform-specific best practices:
- Twitter: Concise, witty, hashtag-optimized
- LinkedIn: Professional, thought-leadership focused
- Instagram: Visual-first, story-driven
- Facebook: Community-focused, shareable
- TikTok: Trendy, entertaining, discovery-focused

Always include relevant hashtags and suggest visual elements when appropriate."#;

pub const MANAGER_ROLE: &str = r#"You are an expert social media manager with deep knowledge of platform algorithms, posting strategies, and audience engagement. Your role is to:

1. Optimize content for specific platform algorithms
2. Recommend optimal posting times and frequency
3. Suggest engagement strategies and community management approaches
4. Provide cross-platform adaptation recommendations
5. Analyze potential reach and engagement metrics
6. Recommend hashtag strategies and tagging approaches
7. Identify opportunities for paid promotion
8. Ensure content compliance with platform guidelines

Your expertise covers:
- Platform-specific algorithm optimization
- Audience targeting and segmentation
- Content scheduling and timing
- Hashtag and keyword strategies
- Visual content recommendations
- Community engagement tactics
- Performance tracking and analytics
- Crisis management and reputation protection

Provide actionable recommendations that maximize reach, engagement, and ROI while maintaining brand authenticity and compliance."#;

pub const REVIEWER_ROLE: &str = r#"You are an expert content reviewer and quality assurance specialist for social media. Your role is to:

1. Review content for accuracy, clarity, and effectiveness
2. Ensure brand consistency and voice alignment
3. Check for potential legal, ethical, or reputational risks
4. Verify compliance with platform guidelines and policies
5. Assess content quality and engagement potential
6. Identify potential improvements or concerns
7. Provide final approval or rejection with detailed feedback
8. Suggest last-minute optimizations

Your review criteria include:
- Content accuracy and fact-checking
- Brand voice and messaging consistency
- Legal and ethical compliance
- Platform policy adherence
- Cultural sensitivity and inclusivity
- Grammar, spelling, and formatting
- Visual content appropriateness
- Hashtag relevance and effectiveness
- Call-to-action clarity and effectiveness
- Overall engagement potential

Provide constructive feedback and actionable recommendations. Be thorough but efficient in your review process."#;

pub fn research_task(topic: &str, target_audience: &str, platform: &str, industry: &str) -> String {
    format!(
        r#"Please conduct a comprehensive trend analysis and research for:

Topic: {topic}
Target Audience: {target_audience}
Platform Focus: {platform}
Industry Context: {industry}

Provide a detailed analysis including current trends, audience insights, content recommendations, and strategic considerations."#
    )
}

pub struct CopyBrief<'a> {
    pub research_insights: &'a str,
    pub content_type: &'a str,
    pub platform: &'a str,
    pub tone: &'a str,
    pub call_to_action: &'a str,
    pub topic: &'a str,
}

pub fn copywriting_task(brief: &CopyBrief<'_>) -> String {
    format!(
        r#"Based on the following research insights, create compelling social media content:

Research Insights: {research_insights}

Content Requirements:
- Platform: {platform}
- Content Type: {content_type}
- Topic: {topic}
- Tone: {tone}
- Call to Action: {call_to_action}

Please create:
1. Main post content (optimized for {platform})
2. Engaging headline/caption
3. Relevant hashtags
4. Suggested visual elements or descriptions
5. Alternative versions for A/B testing

Ensure the content is platform-optimized, engaging, and incorporates the research insights effectively."#,
        research_insights = brief.research_insights,
        platform = brief.platform,
        content_type = brief.content_type,
        topic = brief.topic,
        tone = brief.tone,
        call_to_action = brief.call_to_action,
    )
}

pub struct OptimizationBrief<'a> {
    pub created_content: &'a str,
    pub platform: &'a str,
    pub budget: &'a str,
    pub goals: &'a str,
    pub brand_guidelines: &'a str,
    pub topic: &'a str,
}

pub fn optimization_task(brief: &OptimizationBrief<'_>) -> String {
    format!(
        r#"As a social media manager, please optimize the following content and provide strategic recommendations:

Created Content: {created_content}

Optimization Parameters:
- Platform: {platform}
- Topic: {topic}
- Budget: {budget}
- Goals: {goals}
- Brand Guidelines: {brand_guidelines}

Please provide:
1. Platform-specific optimizations for the content
2. Optimal posting time and frequency recommendations
3. Hashtag strategy (trending, niche, branded)
4. Visual content suggestions and specifications
5. Engagement tactics and community management tips
6. Cross-promotion opportunities across other platforms
7. Paid promotion recommendations (if budget allows)
8. Performance metrics to track
9. Risk assessment and compliance considerations
10. Long-term content series or campaign ideas

Ensure all recommendations are specific to {platform} and aligned with the goals of {goals}."#,
        created_content = brief.created_content,
        platform = brief.platform,
        topic = brief.topic,
        budget = brief.budget,
        goals = brief.goals,
        brand_guidelines = brief.brand_guidelines,
    )
}

pub struct ReviewBrief<'a> {
    pub created_content: &'a str,
    pub optimization_strategy: &'a str,
    pub brand_guidelines: &'a str,
    pub compliance_requirements: &'a str,
    pub target_audience: &'a str,
    pub platform: &'a str,
    pub topic: &'a str,
}

pub fn review_task(brief: &ReviewBrief<'_>) -> String {
    format!(
        r#"Please conduct a comprehensive review of the following social media content and strategy:

Content to Review: {created_content}

Optimization Strategy: {optimization_strategy}

Review Criteria:
- Platform: {platform}
- Topic: {topic}
- Brand Guidelines: {brand_guidelines}
- Compliance Requirements: {compliance_requirements}
- Target Audience: {target_audience}

Please provide a detailed review covering:
1. Content Quality Assessment (accuracy, clarity, engagement potential)
2. Brand Consistency Check (voice, messaging, visual alignment)
3. Compliance Review (platform policies, legal considerations, cultural sensitivity)
4. Risk Assessment (potential controversies, misinterpretations, negative reactions)
5. Technical Review (grammar, spelling, formatting, hashtags)
6. Strategy Alignment (goals, audience, platform optimization)
7. Final Recommendation (APPROVE, APPROVE WITH MODIFICATIONS, or REJECT)
8. Specific Improvement Suggestions (if any)
9. Alternative Approaches (if content is rejected)
10. Performance Predictions (expected reach, engagement, impact)

Be thorough and constructive in your feedback. If approving, highlight strengths. If rejecting or suggesting modifications, provide clear, actionable guidance."#,
        created_content = brief.created_content,
        optimization_strategy = brief.optimization_strategy,
        platform = brief.platform,
        topic = brief.topic,
        brand_guidelines = brief.brand_guidelines,
        compliance_requirements = brief.compliance_requirements,
        target_audience = brief.target_audience,
    )
}
