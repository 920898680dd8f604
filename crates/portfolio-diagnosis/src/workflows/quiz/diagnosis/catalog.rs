use super::{CleanupAdvice, DiagnosisType};

/// Fixed copy shown for a diagnosis category.
pub(crate) struct OutcomeProfile {
    pub emoji: &'static str,
    pub title: &'static str,
    pub diagnosis: &'static str,
    pub news_forecast: &'static str,
    pub cleanup_advice: &'static [CleanupAdvice],
}

pub(crate) fn profile(kind: DiagnosisType) -> &'static OutcomeProfile {
    match kind {
        DiagnosisType::Gambler => &GAMBLER,
        DiagnosisType::Safekeeper => &SAFEKEEPER,
        DiagnosisType::Trendy => &TRENDY,
        DiagnosisType::Balanced => &BALANCED,
        DiagnosisType::Landlord => &LANDLORD,
    }
}

static GAMBLER: OutcomeProfile = OutcomeProfile {
    emoji: "🎰",
    title: "ギャンブラー型",
    diagnosis: "攻めの姿勢は見事ですが、資産の大半が値動きの激しい株式と暗号通貨に集中しています。相場が好調なうちは大きなリターンが期待できる一方、急落局面では資産が一気に目減りするリスクを抱えています。",
    news_forecast: "2026年は金利動向や規制強化のニュースで、リスク資産が大きく揺さぶられる場面がありそうです。「史上最高値」と「急落」の見出しが交互に並ぶ一年になるかもしれません。",
    cleanup_advice: &[
        CleanupAdvice {
            action: "利益の一部を確定する",
            description: "値上がりした銘柄から少しずつ利益を確定し、現金や債券に振り分けておきましょう。",
        },
        CleanupAdvice {
            action: "暗号通貨の比率に上限を決める",
            description: "「ここまで」と決めた比率を超えたら、機械的にリバランスするルールを作りましょう。",
        },
        CleanupAdvice {
            action: "生活防衛資金を確保する",
            description: "生活費の6か月分程度は、すぐに引き出せる預貯金で持っておくと安心です。",
        },
    ],
};

static SAFEKEEPER: OutcomeProfile = OutcomeProfile {
    emoji: "🏦",
    title: "金庫番型",
    diagnosis: "守りは鉄壁です。急な出費や暴落にも動じない安定感がある一方、インフレが進むと現金の実質的な価値はじわじわと目減りしていきます。",
    news_forecast: "2026年も物価上昇が話題になりそうです。預金金利が上がっても、インフレ率に追いつかない「実質マイナス」の状態が続く可能性があります。",
    cleanup_advice: &[
        CleanupAdvice {
            action: "余剰資金の一部を投資に回す",
            description: "生活防衛資金を除いた余剰資金から、少額ずつ積立投資を始めてみましょう。",
        },
        CleanupAdvice {
            action: "新NISAの非課税枠を活用する",
            description: "非課税のメリットを活かし、インデックスファンドでの長期運用を検討しましょう。",
        },
        CleanupAdvice {
            action: "金の比率を見直す",
            description: "金は守りに強い資産ですが、利息や配当を生みません。比率が高すぎないか確認しましょう。",
        },
    ],
};

static BALANCED: OutcomeProfile = OutcomeProfile {
    emoji: "🎓",
    title: "優等生型",
    diagnosis: "インデックスファンドやETFを軸にした、お手本のような分散型ポートフォリオです。長期・積立・分散の基本を押さえており、大きく崩れにくい構成です。",
    news_forecast: "2026年も全世界株式や米国株インデックスが話題の中心になりそうです。短期的な値動きに惑わされず、淡々と積み立てを続けた人が報われる一年になるでしょう。",
    cleanup_advice: &[
        CleanupAdvice {
            action: "年に一度のリバランス",
            description: "値上がりで比率がずれた資産を、年に一度元の配分に戻しましょう。",
        },
        CleanupAdvice {
            action: "ファンドの重複を整理する",
            description: "似た指数に連動するファンドを複数持っていないか確認し、コストの低いものに集約しましょう。",
        },
        CleanupAdvice {
            action: "出口戦略を考えておく",
            description: "取り崩しの時期や方法を今のうちに決めておくと、相場に左右されずに済みます。",
        },
    ],
};

static LANDLORD: OutcomeProfile = OutcomeProfile {
    emoji: "🏠",
    title: "大家さん型",
    diagnosis: "家賃収入という安定したキャッシュフローを持つ、インフレに強いポートフォリオです。ただし不動産はすぐに現金化しにくく、金利上昇や空室リスクの影響を受けやすい点に注意が必要です。",
    news_forecast: "2026年は金利の動きが不動産市場の大きなテーマになりそうです。ローン金利の上昇が利回りを圧迫するニュースに注目しておきましょう。",
    cleanup_advice: &[
        CleanupAdvice {
            action: "ローン金利を確認する",
            description: "変動金利で借りている場合は、金利が上がったときの返済額を試算しておきましょう。",
        },
        CleanupAdvice {
            action: "流動性の高い資産を増やす",
            description: "修繕や空室に備えて、すぐに使える現金や投資信託の比率を少し高めましょう。",
        },
        CleanupAdvice {
            action: "物件の収支を棚卸しする",
            description: "各物件の実質利回りを計算し、保有を続けるか売却するかを見直しましょう。",
        },
    ],
};

static TRENDY: OutcomeProfile = OutcomeProfile {
    emoji: "🦗",
    title: "イナゴ型",
    diagnosis: "特定の資産に偏らず、そのとき話題の投資先に少しずつ手を出している印象です。柔軟さは強みですが、軸となる方針がないと、気づけば高値づかみを繰り返してしまうかもしれません。",
    news_forecast: "2026年も新しい投資テーマが次々と話題になるでしょう。SNSで盛り上がった銘柄ほど、ニュースになった時点ではすでに割高かもしれません。",
    cleanup_advice: &[
        CleanupAdvice {
            action: "投資の目的を書き出す",
            description: "何のために、いつまでに、いくら必要なのかを明確にして、資産配分の軸を決めましょう。",
        },
        CleanupAdvice {
            action: "保有資産を棚卸しする",
            description: "なんとなく買ったまま放置している資産がないか確認し、整理しましょう。",
        },
        CleanupAdvice {
            action: "積立の仕組みを作る",
            description: "話題に左右されないよう、毎月決まった額を自動で積み立てる仕組みを作りましょう。",
        },
    ],
};
