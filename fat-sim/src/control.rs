//! # 分配引擎层
//!
//! 在簇表与目录树之间搭桥：文件的簇链在这里搭建、在这里回收。

use crate::table::ClusterTable;
use crate::vfs::{split_parent, Directory, File, Node};
use crate::{ClusterId, Error, BLOCK_SIZE};

/// 整个模拟文件系统的唯一上下文。
///
/// 进程启动时创建一次，之后以`&mut`显式传给每个操作，
/// 不设任何全局状态；操作之间严格串行。
#[derive(Debug)]
pub struct FatFileSystem {
    table: ClusterTable,
    root: Directory,
}

impl Default for FatFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FatFileSystem {
    pub fn new() -> Self {
        Self {
            table: ClusterTable::new(),
            root: Directory::new("/"),
        }
    }

    pub fn table(&self) -> &ClusterTable {
        &self.table
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// 在`parent`目录下创建`size`字节的文件并搭好簇链。
    ///
    /// 头簇永远先行，0字节的文件也占一簇；
    /// 链尾簇未被占满的部分记为内部碎片。
    ///
    /// 空间检查先于一切簇分配；万一链搭到一半簇表耗尽
    /// （账目一致时仅`size == 0`且磁盘占满可能触发），
    /// 已到手的簇全数退回，失败不留痕。
    pub fn create_file(&mut self, parent: &str, name: &str, size: usize) -> Result<&File, Error> {
        validate_name(name)?;

        let dir = self.root.resolve_mut(parent)?;
        if dir.contains(name) {
            return Err(Error::AlreadyExists);
        }
        if self.table.free_bytes() < size {
            return Err(Error::InsufficientSpace);
        }

        let head = self.table.allocate_one(name)?;
        let mut tail = head;
        let mut covered = BLOCK_SIZE;
        while covered < size {
            let id = match self.table.allocate_one(name) {
                Ok(id) => id,
                Err(e) => {
                    release_chain(&mut self.table, head);
                    return Err(e);
                }
            };
            self.table.link(tail, id);
            tail = id;
            covered += BLOCK_SIZE;
        }
        if covered > size {
            self.table.set_internal_frag(tail, covered - size);
        }

        log::debug!(
            "file {name:?}: {} byte(s) over {} cluster(s) from {head}",
            size,
            covered / BLOCK_SIZE,
        );

        dir.insert_file(File {
            start: head,
            name: name.to_owned(),
            size,
        })
    }

    /// 删除`path`处的文件，整条簇链顺着`next`归还簇表。
    ///
    /// 节点先从目录树摘下、所有权随之转移，
    /// 同一条链不存在被二次释放的机会。
    pub fn delete_file(&mut self, path: &str) -> Result<(), Error> {
        let (parent, name) = split_parent(path)?;
        let file = self.root.resolve_mut(parent)?.remove_file(name)?;
        release_chain(&mut self.table, file.start);

        log::debug!("file {:?} released", file.name);
        Ok(())
    }

    /// 在`parent`目录下创建空目录
    pub fn create_dir(&mut self, parent: &str, name: &str) -> Result<(), Error> {
        validate_name(name)?;
        self.root
            .resolve_mut(parent)?
            .insert_dir(Directory::new(name))
    }

    /// 递归删除`path`处的目录。
    ///
    /// 整棵子树先从父节点摘下，再后序遍历释放其中每个文件的簇链，
    /// 子孙必然先于双亲消失。根目录不可删除。
    pub fn delete_dir(&mut self, path: &str) -> Result<(), Error> {
        if path == "/" {
            return Err(Error::InvalidArgument);
        }

        let (parent, name) = split_parent(path)?;
        let dir = self.root.resolve_mut(parent)?.remove_dir(name)?;
        release_tree(&mut self.table, dir);
        Ok(())
    }

    /// 只读列出`path`目录下的所有节点
    pub fn read_dir(&self, path: &str) -> Result<impl Iterator<Item = &Node>, Error> {
        Ok(self.root.resolve(path)?.entries())
    }
}

/// 从`start`出发边走链边释放
fn release_chain(table: &mut ClusterTable, start: ClusterId) {
    let mut cursor = Some(start);
    while let Some(id) = cursor {
        cursor = table.release(id);
    }
}

fn release_tree(table: &mut ClusterTable, dir: Directory) {
    for node in dir.into_children() {
        match node {
            Node::File(file) => release_chain(table, file.start),
            Node::Directory(sub) => release_tree(table, sub),
        }
    }
}

fn validate_name(name: &str) -> Result<(), Error> {
    if name.is_empty() || name.contains('/') {
        return Err(Error::InvalidArgument);
    }
    Ok(())
}
