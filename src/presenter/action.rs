/// Semantic actions the view routes into the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    /// Start signing in against a server host.
    Submit { host: String },
    /// Resume an OAuth flow from the URL the provider redirected to.
    Resume { callback_url: String },
}

impl LoginAction {
    /// Build the action for whatever the user typed into the host field.
    ///
    /// Anything carrying a `code=` parameter is treated as a pasted callback
    /// URL; everything else is a host.
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        if code_param(input).is_some() {
            LoginAction::Resume {
                callback_url: input.to_string(),
            }
        } else {
            LoginAction::Submit {
                host: input.to_string(),
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LoginAction::Submit { .. } => "submit",
            LoginAction::Resume { .. } => "resume",
        }
    }
}

/// Extract the `code` query parameter from an OAuth callback URL.
pub fn callback_code(url: &str) -> Option<&str> {
    code_param(url).filter(|code| !code.is_empty())
}

/// Raw value of a `code` parameter, which may be empty. The key only counts
/// at the start of the input or right after `?` or `&`.
fn code_param(url: &str) -> Option<&str> {
    let link = url.split('#').next().unwrap_or_default();
    link.split(['?', '&']).find_map(|param| param.strip_prefix("code="))
}
