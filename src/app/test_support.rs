//! In-memory prober for exercising the interactors without libav

use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::domain::model::*;
use crate::error::{CompatError, CompatResult};
use crate::ports::{MediaHandle, ProbePort};

/// What the prober does for a given file name
#[derive(Debug, Clone)]
pub(crate) enum Script {
    OpenFails(i32),
    StreamInfoFails(i32),
    Media {
        container: ContainerInfo,
        streams: Vec<StreamDescriptor>,
    },
}

impl Script {
    pub(crate) fn supported_mp4() -> Self {
        Script::Media {
            container: ContainerInfo::new("mov,mp4,m4a,3gp,3g2,mj2"),
            streams: vec![
                StreamDescriptor::video(0, Codec::H264),
                StreamDescriptor::audio(1, Codec::Aac).with_language(Some("eng")),
            ],
        }
    }

    pub(crate) fn xvid_avi() -> Self {
        Script::Media {
            container: ContainerInfo::new("avi"),
            streams: vec![
                StreamDescriptor::video(0, Codec::Mpeg4)
                    .with_codec_tag(CodecTag::from_fourcc(*b"XVID")),
                StreamDescriptor::audio(1, Codec::Mp3),
            ],
        }
    }

    pub(crate) fn pgs_mkv() -> Self {
        Script::Media {
            container: ContainerInfo::new("matroska,webm"),
            streams: vec![
                StreamDescriptor::video(0, Codec::H264),
                StreamDescriptor::subtitle(1, Codec::HdmvPgs),
            ],
        }
    }
}

/// Prober keyed by file name; unknown names fail to open
#[derive(Default)]
pub(crate) struct ScriptedProbe {
    scripts: HashMap<String, Script>,
    opened: Rc<Cell<usize>>,
    live: Rc<Cell<usize>>,
}

impl ScriptedProbe {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, name: &str, script: Script) -> Self {
        self.scripts.insert(name.to_string(), script);
        self
    }

    /// Number of successful opens so far
    pub(crate) fn opened(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.opened)
    }

    /// Number of handles not yet dropped
    pub(crate) fn live_handles(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.live)
    }
}

impl ProbePort for ScriptedProbe {
    type Handle = ScriptedHandle;

    fn open(&self, path: &Path) -> CompatResult<ScriptedHandle> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let script = self
            .scripts
            .get(&name)
            .cloned()
            .unwrap_or(Script::OpenFails(-1094995529));

        if let Script::OpenFails(code) = script {
            return Err(CompatError::OpenFailure {
                path: path.to_path_buf(),
                code,
                message: "Invalid data found when processing input".to_string(),
            });
        }

        self.opened.set(self.opened.get() + 1);
        self.live.set(self.live.get() + 1);
        Ok(ScriptedHandle {
            path: path.to_path_buf(),
            script,
            live: Rc::clone(&self.live),
        })
    }
}

pub(crate) struct ScriptedHandle {
    path: PathBuf,
    script: Script,
    live: Rc<Cell<usize>>,
}

impl MediaHandle for ScriptedHandle {
    fn probe_streams(&mut self) -> CompatResult<()> {
        match self.script {
            Script::StreamInfoFails(code) => Err(CompatError::StreamInfoFailure {
                path: self.path.clone(),
                code,
                message: "Input/output error".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn container(&self) -> ContainerInfo {
        match &self.script {
            Script::Media { container, .. } => container.clone(),
            _ => ContainerInfo::unknown(),
        }
    }

    fn streams(&self) -> Vec<StreamDescriptor> {
        match &self.script {
            Script::Media { streams, .. } => streams.clone(),
            _ => Vec::new(),
        }
    }
}

impl Drop for ScriptedHandle {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}
