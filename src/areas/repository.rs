use crate::areas::ignore_file::{IGNORE_FILE_NAME, IgnoreFile};
use crate::areas::vcs::{GitCli, VersionControl};
use crate::areas::workspace::Workspace;
use crate::artifacts::core::config::Config;
use crate::artifacts::triage::operator::Operator;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// One working tree together with everything a command needs to act on it.
///
/// Output and prompts go through the injected writer and operator; git is
/// reached only through `vcs`.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    operator: RefCell<Box<dyn Operator>>,
    vcs: Box<dyn VersionControl>,
    workspace: Workspace,
    ignore_file: IgnoreFile,
    config: Config,
}

impl Repository {
    pub fn new(
        path: &Path,
        writer: Box<dyn std::io::Write>,
        operator: Box<dyn Operator>,
        vcs: Box<dyn VersionControl>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;

        let workspace = Workspace::new(path.clone().into_boxed_path());
        let ignore_file = IgnoreFile::new(path.join(IGNORE_FILE_NAME).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            operator: RefCell::new(operator),
            vcs,
            workspace,
            ignore_file,
            config,
        })
    }

    /// Open the working tree that contains `dir`, talking to git through its executable.
    pub fn discover(
        dir: &Path,
        writer: Box<dyn std::io::Write>,
        operator: Box<dyn Operator>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let git = GitCli::discover(&config.git, dir)?;
        let root = git.root().to_path_buf();

        Repository::new(&root, writer, operator, Box::new(git), config)
    }

    /// Wrap `dir` as-is, for commands that run before a repository exists.
    pub fn unborn(
        dir: &Path,
        writer: Box<dyn std::io::Write>,
        operator: Box<dyn Operator>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let git = GitCli::new(config.git.clone(), dir.canonicalize()?);

        Repository::new(dir, writer, operator, Box::new(git), config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn operator(&'_ self) -> RefMut<'_, Box<dyn Operator>> {
        self.operator.borrow_mut()
    }

    pub fn vcs(&self) -> &dyn VersionControl {
        self.vcs.as_ref()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn ignore_file(&self) -> &IgnoreFile {
        &self.ignore_file
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
