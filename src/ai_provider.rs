use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AiProvider {
    /// Groq API（Llama 4 Scout ビジョン）
    #[default]
    Groq,
    /// ローカルの Claude CLI
    Claude,
}

impl AiProvider {
    pub fn name(&self) -> &'static str {
        match self {
            AiProvider::Groq => "groq",
            AiProvider::Claude => "claude",
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
