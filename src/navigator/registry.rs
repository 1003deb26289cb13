//! 文書ごとのナビゲーション状態の保持

use std::collections::HashMap;

use super::NavigatorState;

/// 文書（エディタ、セッション）の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// `DocumentId` をキーにした `NavigatorState` の表
///
/// 同じ文書への呼び出しは呼び出し側で直列化すること
#[derive(Debug, Default)]
pub struct NavigatorRegistry {
    states: HashMap<DocumentId, NavigatorState>,
}

impl NavigatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 文書の状態（なければ初期状態で作成）
    pub fn state_mut(&mut self, id: DocumentId) -> &mut NavigatorState {
        self.states.entry(id).or_default()
    }

    /// 文書の状態を参照
    pub fn state(&self, id: DocumentId) -> Option<&NavigatorState> {
        self.states.get(&id)
    }

    /// 文書を閉じたときに状態を破棄
    pub fn forget(&mut self, id: DocumentId) -> Option<NavigatorState> {
        self.states.remove(&id)
    }

    /// 保持している文書数
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
