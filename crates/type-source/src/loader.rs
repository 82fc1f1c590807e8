//! 类型构件目录装载器
//!
//! 递归遍历类型构件目录, 把每个构件的相对路径还原为完整限定名,
//! 再到类型索引中装载它。单个构件装载失败只记录并跳过,
//! 遍历本身失败则整个操作失败。

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use container_common::{ConfigurationError, SkipReason, TypeSourceError, TypeSourceResult};

use crate::index::{global_type_index, TypeDescriptor, TypeIndex};

/// 类型构件文件的扩展名
pub const ARTIFACT_EXTENSION: &str = "component";

/// 被跳过的构件及原因
#[derive(Debug, Clone)]
pub struct SkippedArtifact {
    /// 构件名 (可还原时为完整限定名, 否则为路径)
    pub name: String,
    /// 跳过原因
    pub reason: SkipReason,
}

/// 一次装载的结果: 成功装载的构件描述符与被跳过的条目
#[derive(Debug)]
pub struct LoadOutcome {
    descriptors: Vec<TypeDescriptor>,
    skipped: Vec<SkippedArtifact>,
}

impl LoadOutcome {
    /// 成功装载的构件描述符
    pub fn descriptors(&self) -> &[TypeDescriptor] {
        &self.descriptors
    }

    /// 被跳过的构件
    pub fn skipped(&self) -> &[SkippedArtifact] {
        &self.skipped
    }
}

impl IntoIterator for LoadOutcome {
    type Item = TypeDescriptor;
    type IntoIter = std::vec::IntoIter<TypeDescriptor>;

    /// 有限的一次性序列; 重新装载需要重新遍历文件系统
    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.into_iter()
    }
}

/// 类型构件装载器
///
/// 持有一组经过筛选的发现根目录与查找用的类型索引。
#[derive(Debug)]
pub struct FileTypeLoader {
    candidates: Vec<PathBuf>,
    roots: Vec<PathBuf>,
    index: &'static TypeIndex,
}

impl FileTypeLoader {
    /// 创建装载器构建器
    pub fn builder() -> FileTypeLoaderBuilder {
        FileTypeLoaderBuilder::new()
    }

    /// 筛选后有效的根目录
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// 从默认根目录 (第一个有效根) 装载
    pub fn load(&self) -> TypeSourceResult<LoadOutcome> {
        let root = self.roots.first().ok_or_else(|| {
            ConfigurationError::NoValidRoot {
                searched: self.candidates.clone(),
            }
        })?;
        self.load_from(root)
    }

    /// 从指定根目录装载
    pub fn load_from(&self, root: &Path) -> TypeSourceResult<LoadOutcome> {
        debug!(root = %root.display(), "开始遍历类型构件目录");

        let mut descriptors = Vec::new();
        let mut skipped = Vec::new();

        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|source| TypeSourceError::Walk {
                root: root.to_path_buf(),
                source: source.into(),
            })?;
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            match derive_qualified_name(root, path) {
                Ok(fqn) => match self.index.lookup(&fqn) {
                    Some(descriptor) => {
                        debug!(%fqn, "构件装载成功");
                        descriptors.push(descriptor);
                    }
                    None => {
                        warn!(%fqn, "无法装载构件: 类型名未登记");
                        skipped.push(SkippedArtifact {
                            name: fqn.clone(),
                            reason: SkipReason::UnknownType { fqn },
                        });
                    }
                },
                Err(reason) => {
                    warn!(path = %path.display(), %reason, "跳过构件条目");
                    skipped.push(SkippedArtifact {
                        name: path.display().to_string(),
                        reason,
                    });
                }
            }
        }

        debug!(
            loaded = descriptors.len(),
            skipped = skipped.len(),
            "目录遍历完成"
        );
        Ok(LoadOutcome {
            descriptors,
            skipped,
        })
    }
}

/// 把构件的相对路径还原为完整限定名
///
/// 去掉根目录前缀与构件扩展名, 路径分隔符转换为 `::`。
fn derive_qualified_name(root: &Path, path: &Path) -> Result<String, SkipReason> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(ARTIFACT_EXTENSION) {
        return Err(SkipReason::UnsupportedExtension {
            expected: ARTIFACT_EXTENSION,
        });
    }

    let Ok(relative) = path.strip_prefix(root) else {
        return Err(SkipReason::OutsideRoot);
    };

    let stem = relative.with_extension("");
    let mut parts = Vec::new();
    for component in stem.components() {
        match component.as_os_str().to_str() {
            Some(part) => parts.push(part),
            None => return Err(SkipReason::NonUtf8Path),
        }
    }
    Ok(parts.join("::"))
}

/// 装载器构建器
#[derive(Debug)]
pub struct FileTypeLoaderBuilder {
    candidates: Vec<PathBuf>,
    index: &'static TypeIndex,
}

impl FileTypeLoaderBuilder {
    /// 创建新的构建器, 默认使用全局类型索引
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            index: global_type_index(),
        }
    }

    /// 追加一个候选根目录
    #[must_use]
    pub fn with_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.push(path.into());
        self
    }

    /// 追加多个候选根目录
    #[must_use]
    pub fn with_roots(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.candidates.extend(paths);
        self
    }

    /// 使用指定的类型索引 (测试用)
    #[must_use]
    pub fn with_index(mut self, index: &'static TypeIndex) -> Self {
        self.index = index;
        self
    }

    /// 构建装载器
    ///
    /// 候选路径中只保留真实存在的目录, 去重并保持原有顺序。
    pub fn build(self) -> FileTypeLoader {
        let mut roots: Vec<PathBuf> = Vec::new();
        for candidate in &self.candidates {
            if candidate.is_dir() && !roots.contains(candidate) {
                roots.push(candidate.clone());
            }
        }
        FileTypeLoader {
            candidates: self.candidates,
            roots,
            index: self.index,
        }
    }
}

impl Default for FileTypeLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
