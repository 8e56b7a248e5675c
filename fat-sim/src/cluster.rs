use derive_more::{Display, From, Into};

/// 簇在表中的位置编号。
///
/// 簇链表以编号为"指针"：簇本体永远躺在簇表的原位，
/// 释放后编号依然有效，只是重新指向一个空闲簇，不存在悬垂引用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[repr(transparent)]
pub struct ClusterId(usize);

impl ClusterId {
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }
}

/// 固定大小的物理存储单元
#[derive(Debug, Clone)]
pub struct Cluster {
    pub(crate) free: bool,
    /// 链表上的后继。仅占用中的簇可以非空。
    pub(crate) next: Option<ClusterId>,
    /// 文件末段未用到的字节数
    pub(crate) internal_frag: usize,
    /// 当前占用者的文件名，仅用于对外展示
    pub(crate) owner: String,
}

impl Default for Cluster {
    fn default() -> Self {
        Self {
            free: true,
            next: None,
            internal_frag: 0,
            owner: String::new(),
        }
    }
}

impl Cluster {
    pub fn is_free(&self) -> bool {
        self.free
    }

    pub fn next(&self) -> Option<ClusterId> {
        self.next
    }

    pub fn internal_frag(&self) -> usize {
        self.internal_frag
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// 原地重置为空闲态，返回先前的后继编号
    pub(crate) fn reset(&mut self) -> Option<ClusterId> {
        self.free = true;
        self.internal_frag = 0;
        self.owner.clear();
        self.next.take()
    }
}
