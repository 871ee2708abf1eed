use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    appstores-feed completions --shell bash > ~/.bash_completion.d/appstores-feed\n\n\
                  Generate zsh completions:\n    appstores-feed completions --shell zsh > ~/.zfunc/_appstores-feed\n\n\
                  Generate fish completions:\n    appstores-feed completions --shell fish > ~/.config/fish/completions/appstores-feed.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
