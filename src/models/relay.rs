use serde::Deserialize;

/// Academy application payload forwarded verbatim to the external form
/// service. Fields the client omits are sent as empty strings, matching the
/// form's own optional-field behavior.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(default)]
pub struct ApplicationRequest {
    /// Privacy policy agreement.
    #[schema(example = "Agree")]
    pub privacy_agreement: String,
    /// Desired game; drives the form's page navigation trace.
    #[schema(example = "VALORANT")]
    pub desired_game: String,

    // Valorant track
    pub valorant_class: String,
    pub valorant_tier: String,
    pub valorant_position: String,

    // Overwatch track
    pub overwatch_class: String,
    pub overwatch_tier: String,
    pub overwatch_position: String,

    // Applicant details
    #[schema(example = "SGEA#31281")]
    pub game_account: String,
    pub name: String,
    pub gender: String,
    #[schema(example = "2025-01-01")]
    pub birth_date: String,
    pub address: String,
    #[schema(example = "010-0000-0000")]
    pub phone_number: String,
    pub discord_id: String,
    pub guardian_name: String,
    pub guardian_phone_number: String,
    pub know_sgea_path: String,
}

impl ApplicationRequest {
    /// Page navigation trace the form expects, branched on the chosen game.
    pub fn page_history(&self) -> &'static str {
        match self.desired_game.as_str() {
            "VALORANT" => "0,1,2,4",
            "OVERWATCH" => "0,1,3,4",
            _ => "0",
        }
    }

    /// Map every field to its fixed external form field identifier.
    pub fn entry_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("entry.389903463", self.privacy_agreement.as_str()),
            ("entry.404655261", self.desired_game.as_str()),
            ("entry.1696074802", self.valorant_class.as_str()),
            ("entry.1681564620", self.valorant_tier.as_str()),
            ("entry.1328489994", self.valorant_position.as_str()),
            ("entry.902463495", self.overwatch_class.as_str()),
            ("entry.565147399", self.overwatch_tier.as_str()),
            ("entry.1532619185", self.overwatch_position.as_str()),
            ("entry.1382061334", self.game_account.as_str()),
            ("entry.1682194881", self.name.as_str()),
            ("entry.1700001593", self.gender.as_str()),
            ("entry.260228334", self.birth_date.as_str()),
            ("entry.318298886", self.address.as_str()),
            ("entry.1682681799", self.phone_number.as_str()),
            ("entry.1475828191", self.discord_id.as_str()),
            ("entry.1603110817", self.guardian_name.as_str()),
            ("entry.76570193", self.guardian_phone_number.as_str()),
            ("pageHistory", self.page_history()),
        ]
    }
}
