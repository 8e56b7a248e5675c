//! # 命名空间层
//!
//! 以目录树组织文件，只维护名字到节点的映射；
//! 簇的分配归属始终在簇表手中，这里的[`File`]仅记下链头编号。

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::{ClusterId, Error};

/// 目录树节点，模式匹配区分两种身份
#[derive(Debug)]
pub enum Node {
    File(File),
    Directory(Directory),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::File(file) => &file.name,
            Node::Directory(dir) => &dir.name,
        }
    }
}

/// 存储对象。大小在创建时定死，之后不再改变。
#[derive(Debug)]
pub struct File {
    /// 簇链的头编号
    pub(crate) start: ClusterId,
    pub(crate) name: String,
    pub(crate) size: usize,
}

impl File {
    pub fn start(&self) -> ClusterId {
        self.start
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// 命名空间节点。根目录`/`创建一次，与进程同寿。
#[derive(Debug)]
pub struct Directory {
    pub(crate) name: String,
    children: BTreeMap<String, Node>,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// 按名字序列出目录下所有节点
    pub fn entries(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    /// 解析绝对路径，一路下行到目标目录。
    ///
    /// 路径必须以`/`开头，否则报[`Error::InvalidArgument`]；
    /// `/`本身直接命中自己，不下行。
    /// 中途段缺失、或者撞上的是文件，一律算[`Error::NotFound`]。
    pub fn resolve(&self, path: &str) -> Result<&Directory, Error> {
        let rest = path.strip_prefix('/').ok_or(Error::InvalidArgument)?;

        let mut dir = self;
        if rest.is_empty() {
            return Ok(dir);
        }
        for seg in rest.split('/') {
            dir = match dir.children.get(seg) {
                Some(Node::Directory(sub)) => sub,
                _ => return Err(Error::NotFound),
            };
        }
        Ok(dir)
    }

    pub fn resolve_mut(&mut self, path: &str) -> Result<&mut Directory, Error> {
        let rest = path.strip_prefix('/').ok_or(Error::InvalidArgument)?;

        let mut dir = self;
        if rest.is_empty() {
            return Ok(dir);
        }
        for seg in rest.split('/') {
            dir = match dir.children.get_mut(seg) {
                Some(Node::Directory(sub)) => sub,
                _ => return Err(Error::NotFound),
            };
        }
        Ok(dir)
    }
}

impl Directory {
    /// 挂入新文件并返回其引用，重名直接拒绝。
    pub(crate) fn insert_file(&mut self, file: File) -> Result<&File, Error> {
        match self.children.entry(file.name.clone()) {
            Entry::Occupied(_) => Err(Error::AlreadyExists),
            Entry::Vacant(vacant) => match vacant.insert(Node::File(file)) {
                Node::File(file) => Ok(&*file),
                Node::Directory(_) => Err(Error::AlreadyExists),
            },
        }
    }

    pub(crate) fn insert_dir(&mut self, dir: Directory) -> Result<(), Error> {
        match self.children.entry(dir.name.clone()) {
            Entry::Occupied(_) => Err(Error::AlreadyExists),
            Entry::Vacant(vacant) => {
                vacant.insert(Node::Directory(dir));
                Ok(())
            }
        }
    }

    /// 摘下名为`name`的文件节点，所有权随之转移
    pub(crate) fn remove_file(&mut self, name: &str) -> Result<File, Error> {
        if !matches!(self.children.get(name), Some(Node::File(_))) {
            return Err(Error::NotFound);
        }
        match self.children.remove(name) {
            Some(Node::File(file)) => Ok(file),
            _ => Err(Error::NotFound),
        }
    }

    /// 摘下名为`name`的子目录，整棵子树随之转移
    pub(crate) fn remove_dir(&mut self, name: &str) -> Result<Directory, Error> {
        if !matches!(self.children.get(name), Some(Node::Directory(_))) {
            return Err(Error::NotFound);
        }
        match self.children.remove(name) {
            Some(Node::Directory(dir)) => Ok(dir),
            _ => Err(Error::NotFound),
        }
    }

    pub(crate) fn into_children(self) -> impl Iterator<Item = Node> {
        self.children.into_values()
    }
}

/// 把绝对路径拆成父目录路径与末段名。
/// `/x`的父目录是`/`；空末段视作目标不存在。
pub(crate) fn split_parent(path: &str) -> Result<(&str, &str), Error> {
    let (parent, name) = path.rsplit_once('/').ok_or(Error::InvalidArgument)?;
    if name.is_empty() {
        return Err(Error::NotFound);
    }
    Ok((if parent.is_empty() { "/" } else { parent }, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Directory {
        let mut root = Directory::new("/");
        let mut home = Directory::new("home");
        home.insert_dir(Directory::new("sub")).unwrap();
        home.insert_file(File {
            start: ClusterId::new(0),
            name: "note".into(),
            size: 10,
        })
        .unwrap();
        root.insert_dir(home).unwrap();
        root
    }

    #[test]
    fn resolve_root_is_identity() {
        let root = sample_tree();
        assert_eq!("/", root.resolve("/").unwrap().name());
    }

    #[test]
    fn resolve_walks_segments() {
        let root = sample_tree();
        assert_eq!("sub", root.resolve("/home/sub").unwrap().name());
    }

    #[test]
    fn resolve_is_idempotent() {
        let root = sample_tree();
        let first: Vec<_> = root
            .resolve("/home")
            .unwrap()
            .entries()
            .map(Node::name)
            .collect();
        let second: Vec<_> = root
            .resolve("/home")
            .unwrap()
            .entries()
            .map(Node::name)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_segment_is_not_found() {
        let root = sample_tree();
        assert!(matches!(root.resolve("/nope"), Err(Error::NotFound)));
        assert!(matches!(root.resolve("/home/nope"), Err(Error::NotFound)));
    }

    #[test]
    fn file_in_the_middle_is_not_found() {
        let root = sample_tree();
        assert!(matches!(root.resolve("/home/note"), Err(Error::NotFound)));
        assert!(matches!(root.resolve("/home/note/x"), Err(Error::NotFound)));
    }

    #[test]
    fn relative_path_is_rejected() {
        let root = sample_tree();
        assert!(matches!(root.resolve("home"), Err(Error::InvalidArgument)));
        assert!(matches!(root.resolve(""), Err(Error::InvalidArgument)));
    }

    #[test]
    fn split_parent_cases() {
        assert_eq!(Ok(("/", "a")), split_parent("/a"));
        assert_eq!(Ok(("/a", "b")), split_parent("/a/b"));
        assert_eq!(Err(Error::NotFound), split_parent("/"));
        assert_eq!(Err(Error::NotFound), split_parent("/a/"));
        assert_eq!(Err(Error::InvalidArgument), split_parent("a"));
    }
}
