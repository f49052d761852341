use std::fmt::Write;

use color_eyre::{eyre::bail, Result};

use crate::models::{ChallengeData, ChallengeFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeStatus {
    Idle,
    Reviewing,
}

/// Editable multi-file buffer behind one coding-challenge widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeWorkspace {
    data: ChallengeData,
    files: Vec<ChallengeFile>,
    active_file: usize,
    status: ChallengeStatus,
}

impl ChallengeWorkspace {
    pub fn new(data: ChallengeData) -> Self {
        Self {
            files: data.files.clone(),
            data,
            active_file: 0,
            status: ChallengeStatus::Idle,
        }
    }

    pub fn data(&self) -> &ChallengeData {
        &self.data
    }

    pub fn files(&self) -> &[ChallengeFile] {
        &self.files
    }

    pub fn active_file(&self) -> usize {
        self.active_file
    }

    pub fn status(&self) -> ChallengeStatus {
        self.status
    }

    pub fn select_file(&mut self, idx: usize) -> Result<()> {
        if idx >= self.files.len() {
            bail!("challenge '{}' has no file {idx}", self.data.title);
        }
        self.active_file = idx;
        Ok(())
    }

    pub fn edit_file(&mut self, idx: usize, content: String) -> Result<()> {
        let Some(file) = self.files.get_mut(idx) else {
            bail!("challenge '{}' has no file {idx}", self.data.title);
        };
        file.content = content;
        Ok(())
    }

    /// Marks the workspace as under review and returns the submission message.
    pub fn submit(&mut self) -> Result<String> {
        if self.status == ChallengeStatus::Reviewing {
            bail!("challenge '{}' is already being reviewed", self.data.title);
        }
        self.status = ChallengeStatus::Reviewing;
        Ok(self.report())
    }

    fn report(&self) -> String {
        let mut report = format!(
            "I've finished the coding challenge \"{}\". Please review my code.\n\n\
             Original requirements:\n{}\n\nMy files:\n",
            self.data.title, self.data.description
        );

        for file in &self.files {
            let _ = write!(
                report,
                "\n{} ({}):\n```{}\n{}\n```\n",
                file.name, file.language, file.language, file.content
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge() -> ChallengeData {
        ChallengeData {
            title: "Adder".to_string(),
            description: "implement add".to_string(),
            feedback: None,
            files: vec![
                ChallengeFile {
                    name: "index.js".to_string(),
                    language: "javascript".to_string(),
                    content: "function add(a,b){}".to_string(),
                },
                ChallengeFile {
                    name: "style.css".to_string(),
                    language: "css".to_string(),
                    content: "body {}".to_string(),
                },
            ],
        }
    }

    #[test]
    fn report_contains_description_and_file_content() {
        let mut workspace = ChallengeWorkspace::new(challenge());

        let report = workspace.submit().unwrap();

        assert!(report.contains("implement add"));
        assert!(report.contains("function add(a,b){}"));
        assert!(report.contains("style.css (css)"));
        assert_eq!(workspace.status(), ChallengeStatus::Reviewing);
    }

    #[test]
    fn edits_land_in_the_submission() {
        let mut workspace = ChallengeWorkspace::new(challenge());
        workspace.select_file(1).unwrap();
        workspace
            .edit_file(0, "function add(a,b){ return a + b; }".to_string())
            .unwrap();

        assert_eq!(workspace.active_file(), 1);
        let report = workspace.submit().unwrap();
        assert!(report.contains("return a + b;"));
        assert_eq!(workspace.data().files[0].content, "function add(a,b){}");
    }

    #[test]
    fn rejects_unknown_files_and_double_submit() {
        let mut workspace = ChallengeWorkspace::new(challenge());
        assert!(workspace.select_file(2).is_err());
        assert!(workspace.edit_file(5, String::new()).is_err());

        workspace.submit().unwrap();
        assert!(workspace.submit().is_err());
    }
}
