use std::path::PathBuf;
use serde::{Serialize, Deserialize};
use temporarily::{CleanupReport, DirOptions, FileOptions, Tracker};

pub mod repl;

pub use repl::AppMode;

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(tag="Message")]
pub enum Message {
    CreateDir(CreateDir),
    CreateFile(CreateFile),
    Created(Created),
    Cleanup,
    CleanedUp(CleanedUp),
    ListTracked,
    Tracked(Tracked),
    Error(ErrorReply),
    Quit,
}

impl Message {
    pub fn create_dir(dir: Option<PathBuf>, name: Option<String>) -> Self {
        Message::CreateDir(CreateDir { dir, name })
    }

    pub fn create_file(dir: Option<PathBuf>, name: Option<String>, data: &str) -> Self {
        Message::CreateFile(CreateFile { dir, name, data: data.to_owned() })
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap()
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.to_json()).unwrap()
    }

    pub fn from_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct CreateDir {
    pub dir: Option<PathBuf>,
    pub name: Option<String>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct CreateFile {
    pub dir: Option<PathBuf>,
    pub name: Option<String>,
    pub data: String,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Created {
    pub filepath: PathBuf,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct CleanedUp {
    pub removed: usize,
    pub missing: usize,
    pub failed: usize,
}

impl From<CleanupReport> for CleanedUp {
    fn from(report: CleanupReport) -> Self {
        Self {
            removed: report.removed,
            missing: report.missing,
            failed: report.failed,
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Tracked {
    pub paths: Vec<PathBuf>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ErrorReply {
    pub msg: String,
}

/// Runs requests against the process-wide tracker, which is the one the exit
/// handler knows about.
pub struct Executor {
    tracker: &'static Tracker,
}

impl Executor {
    pub fn new() -> Self {
        Self {
            tracker: temporarily::tracker(),
        }
    }

    pub fn exec_str(&mut self, s: &str) -> Result<Message, String> {
        let req = Message::from_str(s).map_err(|e| e.to_string())?;

        Ok(self.execute(req))
    }

    pub fn execute(&mut self, req: Message) -> Message {
        tracing::debug!(request = ?req, "Execute");

        match req {
            Message::CreateDir(c) => self.create_dir(c),
            Message::CreateFile(c) => self.create_file(c),
            Message::Cleanup => Message::CleanedUp(self.tracker.cleanup().into()),
            Message::ListTracked => Message::Tracked(Tracked { paths: self.tracker.paths() }),
            Message::Quit => std::process::exit(0),
            other => Message::Error(ErrorReply { msg: format!("Not a request: {:?}", other) }),
        }
    }

    pub fn create_dir(&mut self, req: CreateDir) -> Message {
        let mut options = DirOptions::new();
        if let Some(dir) = req.dir {
            options.dir(dir);
        }
        if let Some(name) = req.name {
            options.name(name);
        }

        match self.tracker.dir(&options) {
            Ok(dir) => Message::Created(Created { filepath: dir.filepath }),
            Err(e) => Message::Error(ErrorReply { msg: e.to_string() }),
        }
    }

    pub fn create_file(&mut self, req: CreateFile) -> Message {
        let mut options = FileOptions::new();
        options.data(req.data);
        if let Some(dir) = req.dir {
            options.dir(dir);
        }
        if let Some(name) = req.name {
            options.name(name);
        }

        match self.tracker.file(&options) {
            Ok(file) => Message::Created(Created { filepath: file.filepath }),
            Err(e) => Message::Error(ErrorReply { msg: e.to_string() }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serialize_to_json() {
        let cmd = Message::create_file(Some("/tmp".into()), None, "Hello World!");
        let s = cmd.to_json_string();
        assert!(s.contains(r#""Message":"CreateFile""#));
        assert_eq!(Message::from_str(&s).unwrap(), cmd);
    }

    #[test]
    fn unit_messages_round_trip() {
        let s = Message::Quit.to_json_string();
        assert_eq!(s, r#"{"Message":"Quit"}"#);
        assert_eq!(Message::from_str(&s).unwrap(), Message::Quit);
    }

    #[test]
    fn replies_are_not_requests() {
        let mut ex = Executor::new();
        let reply = ex.execute(Message::Created(Created { filepath: "/x".into() }));
        assert!(matches!(reply, Message::Error(_)));
    }
}
