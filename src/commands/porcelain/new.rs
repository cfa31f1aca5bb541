use crate::areas::repository::Repository;
use derive_new::new;
use std::io::Write;
use std::path::Path;

const DEFAULT_BRANCH: &str = "main";
const README: &str = "README.md";

#[derive(Debug, Clone, Default, new)]
pub struct NewOptions {
    /// URL of the (empty or freshly created) remote; asked for when absent
    pub url: Option<String>,
    /// Message for the initial commit; asked for when absent
    pub message: Option<String>,
    /// Answer yes to every confirmation
    pub assume_yes: bool,
}

impl Repository {
    /// Turn the current directory into a repository published to a new remote.
    pub fn new_repository(&mut self, options: &NewOptions) -> anyhow::Result<()> {
        if self.path().join(".git").exists() {
            anyhow::bail!(
                "{} is already a repository; use `vc push` instead",
                self.path().display()
            );
        }

        writeln!(
            self.writer(),
            "You will need a URL like https://github.com/username/reponame"
        )?;
        if !self.confirm(options, "create local repo and initial check in")? {
            writeln!(self.writer(), "vc new exited without any changes.")?;
            return Ok(());
        }

        self.vcs().init()?;
        self.vcs().set_initial_branch(DEFAULT_BRANCH)?;
        self.commit_local(options.message.as_deref())?;

        let url = match &options.url {
            Some(url) => url.trim().to_string(),
            None => self.operator().ask("URL for remote repository: ")?.trim().to_string(),
        };
        if url.is_empty() {
            anyhow::bail!("No remote URL given; the local repository was created without a remote");
        }

        let remote = self.config().remote.clone();
        self.vcs().add_remote(&remote, &url)?;
        self.vcs().fetch(&remote)?;

        // the remote may have been created with a license or README already
        if self.vcs().has_remote_branch(&remote, DEFAULT_BRANCH)? {
            self.vcs().set_upstream(&remote, DEFAULT_BRANCH)?;
            self.vcs().pull(&remote, Some(DEFAULT_BRANCH), true)?;
        }

        if !self.workspace().exists(Path::new(README)) && self.confirm(options, "create README.md")?
        {
            let name = self
                .path()
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "vc".to_string());
            self.workspace()
                .write_file(Path::new(README), &format!("# {name}\n"))?;
            self.vcs().stage(Path::new(README))?;
            self.vcs().commit_all("created README.md")?;
        }

        self.vcs().publish(&remote, DEFAULT_BRANCH, true)
    }

    fn confirm(&self, options: &NewOptions, action: &str) -> anyhow::Result<bool> {
        if options.assume_yes {
            return Ok(true);
        }

        self.operator().confirm(action)
    }
}
