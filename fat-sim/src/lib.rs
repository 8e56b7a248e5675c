/* fat-sim 的整体架构，自上而下 */

// 分配引擎层：文件与目录操作的唯一入口
mod control;

// 命名空间层：目录树与路径解析
mod vfs;

// 簇表层：定长簇仓库与空闲簇管理
mod table;

// 簇：物理分配单元及其编号
mod cluster;

mod error;

pub use self::{
    cluster::{Cluster, ClusterId},
    control::FatFileSystem,
    error::Error,
    table::ClusterTable,
    vfs::{Directory, File, Node},
};

/// 单个簇的字节数
pub const BLOCK_SIZE: usize = 512;
/// 模拟磁盘的总容量
pub const DISK_SIZE: usize = 8192;
/// 磁盘的簇总数
pub const TOTAL_BLOCKS: usize = DISK_SIZE / BLOCK_SIZE;
