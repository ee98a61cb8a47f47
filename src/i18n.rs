//! Display strings for the three supported languages.
//!
//! Every language is an exhaustive `match` over [`Key`], so a table that
//! forgets a key does not compile.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    En,
    Ja,
    Zh,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::En, Lang::Ja, Lang::Zh];

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ja => "ja",
            Lang::Zh => "zh",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Lang::En => "EN",
            Lang::Ja => "日本語",
            Lang::Zh => "中文",
        }
    }

    /// Accepts bare codes and locale tags (`ja_JP.UTF-8`, `zh-Hant`).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_', '.', '@']).next().unwrap_or("");
        match lang {
            "en" => Some(Lang::En),
            "ja" => Some(Lang::Ja),
            "zh" => Some(Lang::Zh),
            _ => None,
        }
    }

    /// Japanese and Chinese locales pick their language, everything else English.
    pub fn from_locale(locale: Option<&str>) -> Self {
        let locale = locale.unwrap_or("en").trim().to_ascii_lowercase();
        if locale.starts_with("ja") {
            Lang::Ja
        } else if locale.starts_with("zh") {
            Lang::Zh
        } else {
            Lang::En
        }
    }

    pub fn next(self) -> Self {
        match self {
            Lang::En => Lang::Ja,
            Lang::Ja => Lang::Zh,
            Lang::Zh => Lang::En,
        }
    }
}

/// First non-empty of the usual POSIX locale variables.
pub fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty() && value != "C" && value != "POSIX")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Title,
    Subtitle,
    Device,
    WhatIf,
    Views,
    Clear,
    Teams,
    LegendQualified,
    LegendTiebreak,
    LegendTieNote,
    LegendEliminated,
    HoverQualified,
    HoverTiebreaker,
    HoverEliminated,
    Howto,
    Howto1,
    Howto2,
    Howto3,
    CalloutApina,
    CalloutFiveway,
    NoteGigo,
    Loading,
    LoadError,
    Help,
    FooterKeys,
    Matching,
}

impl Key {
    pub const ALL: [Key; 26] = [
        Key::Title,
        Key::Subtitle,
        Key::Device,
        Key::WhatIf,
        Key::Views,
        Key::Clear,
        Key::Teams,
        Key::LegendQualified,
        Key::LegendTiebreak,
        Key::LegendTieNote,
        Key::LegendEliminated,
        Key::HoverQualified,
        Key::HoverTiebreaker,
        Key::HoverEliminated,
        Key::Howto,
        Key::Howto1,
        Key::Howto2,
        Key::Howto3,
        Key::CalloutApina,
        Key::CalloutFiveway,
        Key::NoteGigo,
        Key::Loading,
        Key::LoadError,
        Key::Help,
        Key::FooterKeys,
        Key::Matching,
    ];

    /// Name used by data files (e.g. a callout's `textKey`).
    pub fn name(self) -> &'static str {
        match self {
            Key::Title => "title",
            Key::Subtitle => "subtitle",
            Key::Device => "device",
            Key::WhatIf => "whatIf",
            Key::Views => "views",
            Key::Clear => "clear",
            Key::Teams => "teams",
            Key::LegendQualified => "legendQualified",
            Key::LegendTiebreak => "legendTiebreak",
            Key::LegendTieNote => "legendTieNote",
            Key::LegendEliminated => "legendEliminated",
            Key::HoverQualified => "hoverQualified",
            Key::HoverTiebreaker => "hoverTiebreaker",
            Key::HoverEliminated => "hoverEliminated",
            Key::Howto => "howto",
            Key::Howto1 => "howto1",
            Key::Howto2 => "howto2",
            Key::Howto3 => "howto3",
            Key::CalloutApina => "callout-apina",
            Key::CalloutFiveway => "callout-fiveway",
            Key::NoteGigo => "noteGiGO",
            Key::Loading => "loading",
            Key::LoadError => "loadError",
            Key::Help => "help",
            Key::FooterKeys => "footerKeys",
            Key::Matching => "matching",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Key::ALL.iter().copied().find(|key| key.name() == name)
    }
}

pub fn t(lang: Lang, key: Key) -> &'static str {
    match lang {
        Lang::En => en(key),
        Lang::Ja => ja(key),
        Lang::Zh => zh(key),
    }
}

fn en(key: Key) -> &'static str {
    match key {
        Key::Title => {
            "BEMANI PRO LEAGUE S5 SDVX Playoff Qualification Scenarios (After Regular Stage - Game 10)"
        }
        Key::Subtitle => "Outcome visualization for all remaining W/D/L combinations.",
        Key::Device => "For the best experience, widen the terminal to at least 120 columns.",
        Key::WhatIf => "What if… (Match Results)",
        Key::Views => "Views",
        Key::Clear => "Clear",
        Key::Teams => " Teams",
        Key::LegendQualified => "Qualified",
        Key::LegendTiebreak => "Tiebreaker (VP tied)",
        Key::LegendTieNote => "Numbers = number of tied teams",
        Key::LegendEliminated => "Eliminated",
        Key::HoverQualified => "Qualified",
        Key::HoverTiebreaker => "Tiebreaker",
        Key::HoverEliminated => "Eliminated",
        Key::Howto => "How to read?",
        Key::Howto1 => {
            "The charts visualize all possible outcomes across the remaining matches and how each team could advance."
        }
        Key::Howto2 => {
            "Each cell represents one possible W/D/L combination across the remaining 4 matches. Colors indicate the result for each team in that scenario."
        }
        Key::Howto3 => {
            "Hover a cell to highlight the same scenario across all views. Click a cell to apply filters matching that scenario."
        }
        Key::CalloutApina => "APINA VRAMeS might still be eliminated even if they win their final game.",
        Key::CalloutFiveway => {
            "If everything aligns, FIVE teams could end up tied on VP — forcing a chaotic tiebreaker scenario."
        }
        Key::NoteGigo => {
            "9 blocks, each contains a W/D/L scenario combination regarding 2 matches of GiGO."
        }
        Key::Loading => "Loading scenario data…",
        Key::LoadError => "Error",
        Key::Help => "Help",
        Key::FooterKeys => {
            "1-4 Filter | c Clear | ←↑↓→ Move | Enter Apply | g Language | o Callouts | i How to read | ? Help | q Quit"
        }
        Key::Matching => "matching",
    }
}

fn ja(key: Key) -> &'static str {
    match key {
        Key::Title => {
            "BEMANI PRO LEAGUE S5 SDVX 勝敗別・セミファイナル進出シナリオ (レギュラーステージ 第10試合終了時点)"
        }
        Key::Subtitle => {
            "残り試合の勝敗（勝/分/敗）組み合わせを、各チームの進出/タイブレーク/敗退で可視化します。"
        }
        Key::Device => "最適な閲覧体験のため、ターミナルの幅を120桁以上にしてご利用ください。",
        Key::WhatIf => "試合結果",
        Key::Views => "チーム別ビュー",
        Key::Clear => "リセット",
        Key::Teams => "チーム",
        Key::LegendQualified => "セミファイナル進出",
        Key::LegendTiebreak => "タイブレーク（勝点が同点）",
        Key::LegendTieNote => "数字 = 同点チーム数",
        Key::LegendEliminated => "レギュラーステージ敗退",
        Key::HoverQualified => "進出確定",
        Key::HoverTiebreaker => "タイブレーク",
        Key::HoverEliminated => "敗退確定",
        Key::Howto => "読み方",
        Key::Howto1 => {
            "以下の図は、残り試合のすべての結果パターンにおいて、各チームがどのように進出状況が変化するかを可視化したものです。"
        }
        Key::Howto2 => {
            "各セルは、残り4試合における勝敗（勝／分／負）の1つの組み合わせを表しています。色はそのシナリオにおける進出状況を示しています。"
        }
        Key::Howto3 => {
            "セルにカーソルを合わせると、同一シナリオがすべての図でハイライトされます。セルをクリックすると、その結果に対応するシナリオのみが表示されます。"
        }
        Key::CalloutApina => "APINA VRAMeSは最終戦に勝っても、敗退する可能性があります。",
        Key::CalloutFiveway => {
            "条件がすべて噛み合うと、5チームが勝点で同率となり、混沌としたタイブレークに突入する可能性も…！？"
        }
        Key::NoteGigo => {
            "全9ブロックで、各ブロックはGiGOの2試合における勝敗（W/D/L）のシナリオ1通りを表しています。"
        }
        Key::Loading => "シナリオデータを読み込み中…",
        Key::LoadError => "エラー",
        Key::Help => "ヘルプ",
        Key::FooterKeys => {
            "1-4 絞り込み | c リセット | ←↑↓→ 移動 | Enter 適用 | g 言語 | o 吹き出し | i 読み方 | ? ヘルプ | q 終了"
        }
        Key::Matching => "件一致",
    }
}

fn zh(key: Key) -> &'static str {
    match key {
        Key::Title => "BEMANI PRO LEAGUE S5 SDVX 常规赛第10轮后 晋级形势可视化",
        Key::Subtitle => "用颜色展示剩余比赛所有（胜/平/负）组合下的晋级形势。",
        Key::Device => "为获得最佳浏览体验，请将终端宽度调整到至少120列。",
        Key::WhatIf => "假设赛果是……",
        Key::Views => "各队情况图",
        Key::Clear => "重置",
        Key::Teams => "队",
        Key::LegendQualified => "晋级季后赛",
        Key::LegendTiebreak => "比较 pt / 胜负关系",
        Key::LegendTieNote => "数字 = 同分队伍数量",
        Key::LegendEliminated => "常规赛淘汰",
        Key::HoverQualified => "必定晋级",
        Key::HoverTiebreaker => "需要破平",
        Key::HoverEliminated => "必定淘汰",
        Key::Howto => "如何读图",
        Key::Howto1 => "图表展示了在剩余比赛的所有可能结果下，各支队伍的晋级情况变化。",
        Key::Howto2 => {
            "每一个色块代表剩余 4 场比赛中一种胜 / 平 / 负的组合情况。颜色表示该情形下的结果：晋级、需要破平，或被淘汰。"
        }
        Key::Howto3 => {
            "将鼠标悬停在色块上，可在所有视图中高亮同一种组合情况。点击色块，可筛选出与该情况一致的比赛结果。"
        }
        Key::CalloutApina => "就算 APINA VRAMeS 获胜，在最糟糕的几种情况下仍然可能出局。",
        Key::CalloutFiveway => {
            "有一种最离谱的剧本——5只队伍的胜分甚至会完全相同，并列第三，直接进入完全无法预测的破平环节…！？"
        }
        Key::NoteGigo => {
            "9个区域中，每一个区域表示一种 GiGO 自己参与的两场比赛的胜/平/负情景组合。"
        }
        Key::Loading => "正在加载情景数据…",
        Key::LoadError => "错误",
        Key::Help => "帮助",
        Key::FooterKeys => {
            "1-4 筛选 | c 重置 | ←↑↓→ 移动 | Enter 应用 | g 语言 | o 注释 | i 如何读图 | ? 帮助 | q 退出"
        }
        Key::Matching => "个符合",
    }
}
