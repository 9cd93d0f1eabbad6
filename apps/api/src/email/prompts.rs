// Prompt template for the generate-email route.

/// Renders the generation prompt. Pure; no escaping is applied to `prompt`.
///
/// The user's text is dropped into the quoted USER INPUT block as-is. Quotes
/// inside it are not escaped, so a prompt can close the block early. See the
/// prompt-injection note in DESIGN.md before changing this.
///
/// Both user-supplied values are rendered in a single pass, so braces typed
/// into either one are never treated as placeholders.
pub fn build_email_prompt(prompt: &str, tone: Option<&str>) -> String {
    let tone_line = match tone {
        Some(tone) => format!("\n- Write this email in a {tone} tone."),
        None => String::new(),
    };

    format!(
        r#"You are an expert email writer. Based on the user's input provided below, craft a professional, well-structured email.

Please analyze the topic/idea and generate a complete email that includes:

1. **Subject Line**: Create an engaging, relevant subject line
2. **Greeting**: Appropriate salutation based on context
3. **Body Content**:
   - Clear introduction establishing purpose
   - Well-organized main points developing the topic
   - Specific details or calls to action where appropriate
   - Professional tone matching the topic's nature
4. **Closing**: Polite conclusion with appropriate sign-off
5. **Sender Information**: Name placeholder and optional position

Key Requirements:
- Adapt writing style to suit the topic (business, informational, promotional, etc.)
- Maintain clarity and conciseness
- Ensure proper email formatting and structure
- Make reasonable assumptions about context where needed
- Keep the email focused and purposeful
- Keep length of email of 200 words and human tone{tone_line}

USER INPUT:
"{prompt}"

Generate the email now:"#
    )
}
