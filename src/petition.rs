//! Built-in sample petition: an "ação de obrigação de fazer" between JOÃO and
//! MARIA, set in 12pt Arial.

use crate::model::TextBlock;
use crate::style::StyleOverrides;

pub const SAMPLE_FONT_NAME: &str = "Arial";
pub const DEFAULT_FONT_PATH: &str = "C:/Windows/Fonts/arial.ttf";
pub const DEFAULT_OUTPUT: &str = "documento_juridico_teste.pdf";
pub const SAMPLE_BASE_STYLE: &str = "Normal";

const ENDERECAMENTO: &str = "
EXCELENTÍSSIMO SENHOR DOUTOR JUIZ DE DIREITO DA ___ VARA CÍVEL DA COMARCA DE SÃO PAULO - SP
";

const QUALIFICACAO: &str = "
JOÃO, brasileiro, solteiro, advogado, inscrito na OAB/SP sob o nº 000000, com escritório profissional situado na Rua das Flores, nº 123, Bairro Centro, São Paulo/SP, por meio de seu advogado infra-assinado, vem, respeitosamente, à presença de Vossa Excelência propor a presente
AÇÃO DE OBRIGAÇÃO DE FAZER
em face de MARIA, brasileira, empresária, inscrita no CPF sob o nº 111.111.111-11, residente e domiciliada na Rua das Palmeiras, nº 456, Bairro Jardim, São Paulo/SP, pelos motivos de fato e de direito a seguir expostos.
";

const FATOS: &str = "
DOS FATOS
O Requerente celebrou contrato de prestação de serviços com a Requerida em 10 de janeiro de 2022, com prazo de vigência de 12 meses. Ocorre que a Requerida deixou de cumprir com as obrigações assumidas, notadamente no que se refere ao pagamento das parcelas mensais ajustadas, o que vem causando graves prejuízos ao Requerente.
";

const DIREITO: &str = "
DO DIREITO
Nos termos do artigo 389 do Código Civil, o inadimplemento das obrigações contratuais sujeita o devedor ao pagamento de perdas e danos, além de juros e correção monetária. Assim, resta evidente a obrigação da Requerida em reparar os prejuízos sofridos pelo Requerente.
";

const PEDIDOS: &str = "
DOS PEDIDOS
Diante do exposto, requer-se:
1. A citação da Requerida para, querendo, apresentar defesa, sob pena de revelia;
2. A condenação da Requerida ao pagamento das parcelas vencidas e vincendas, acrescidas de juros e correção monetária;
3. A condenação da Requerida ao pagamento de honorários advocatícios, nos termos do artigo 85 do CPC;
4. A produção de todas as provas em direito admitidas, especialmente a documental e testemunhal;
5. A procedência total da presente demanda.
Nestes termos, pede deferimento.
São Paulo, 03 de outubro de 2025.
";

const ASSINATURA: &str = "
_____________________________________
JOÃO
OAB/SP 000000
";

pub fn sample_blocks() -> Vec<TextBlock> {
    [ENDERECAMENTO, QUALIFICACAO, FATOS, DIREITO, PEDIDOS, ASSINATURA]
        .into_iter()
        .map(TextBlock::from)
        .collect()
}

/// Overrides producing the `JuridicoArial` style on top of `Normal`.
pub fn juridico_arial() -> StyleOverrides {
    StyleOverrides {
        name: Some("JuridicoArial".into()),
        font: Some(SAMPLE_FONT_NAME.into()),
        font_size: Some(12.0),
        leading: Some(16.0),
        space_after: Some(12.0),
        ..StyleOverrides::default()
    }
}
