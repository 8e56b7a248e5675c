//! # 簇表层
//!
//! 进程启动时一次性铺满[`TOTAL_BLOCKS`]个簇，此后长度不变：
//! 簇只会原地复用，不会增删。

use core::iter;

use crate::{Cluster, ClusterId, Error, BLOCK_SIZE, DISK_SIZE, TOTAL_BLOCKS};

/// 定长簇表，所有簇的分配归属都由它掌管。
///
/// 不变式：`free_bytes == DISK_SIZE - BLOCK_SIZE * 占用簇数`。
#[derive(Debug)]
pub struct ClusterTable {
    clusters: Vec<Cluster>,
    /// 尚未分配出去的总容量（字节）
    free_bytes: usize,
    /// 外部碎片计数。声明即全部，暂无任何操作更新它。
    external_frag: usize,
}

impl Default for ClusterTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterTable {
    pub fn new() -> Self {
        Self {
            clusters: vec![Cluster::default(); TOTAL_BLOCKS],
            free_bytes: DISK_SIZE,
            external_frag: 0,
        }
    }

    /// 首次适应：按表序找到第一个空闲簇，标记占用并打上归属文件名。
    /// 表中已无空闲簇时报[`Error::OutOfSpace`]。
    pub fn allocate_one(&mut self, owner: &str) -> Result<ClusterId, Error> {
        let id = self
            .clusters
            .iter()
            .position(Cluster::is_free)
            .map(ClusterId::new)
            .ok_or(Error::OutOfSpace)?;

        let cluster = &mut self.clusters[usize::from(id)];
        cluster.free = false;
        cluster.owner.push_str(owner);
        self.free_bytes -= BLOCK_SIZE;

        Ok(id)
    }

    /// 回收簇：原地重置为空闲态，立即可被后续分配复用。
    /// 返回它先前的后继编号，方便调用方边走链边释放。
    pub fn release(&mut self, id: ClusterId) -> Option<ClusterId> {
        let cluster = &mut self.clusters[usize::from(id)];
        assert!(!cluster.free, "releasing a cluster that is already free");

        let next = cluster.reset();
        self.free_bytes += BLOCK_SIZE;
        next
    }

    /// 把`next`挂到`prev`的后继上
    pub fn link(&mut self, prev: ClusterId, next: ClusterId) {
        assert!(!self.clusters[usize::from(next)].free);

        let prev = &mut self.clusters[usize::from(prev)];
        assert!(!prev.free, "linking from a free cluster");
        prev.next = Some(next);
    }

    /// 记录链尾簇未被文件占满的字节数
    pub fn set_internal_frag(&mut self, id: ClusterId, frag: usize) {
        assert!(frag <= BLOCK_SIZE);

        let cluster = &mut self.clusters[usize::from(id)];
        assert!(!cluster.free);
        cluster.internal_frag = frag;
    }

    pub fn get(&self, id: ClusterId) -> &Cluster {
        &self.clusters[usize::from(id)]
    }

    pub fn next_of(&self, id: ClusterId) -> Option<ClusterId> {
        self.clusters[usize::from(id)].next
    }

    /// 从`start`出发沿`next`走完整条簇链
    pub fn chain(&self, start: ClusterId) -> impl Iterator<Item = ClusterId> + '_ {
        let mut cursor = Some(start);
        iter::from_fn(move || {
            let id = cursor?;
            cursor = self.next_of(id);
            Some(id)
        })
    }

    /// 按表序给出每个簇的状态。惰性、可反复调用、不产生任何修改，
    /// 仅供外部报表消费。
    pub fn dump(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(i, cluster)| (ClusterId::new(i), cluster))
    }

    pub const fn free_bytes(&self) -> usize {
        self.free_bytes
    }

    pub const fn external_frag(&self) -> usize {
        self.external_frag
    }
}
